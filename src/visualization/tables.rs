use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::models::{
    AgePyramid, CountryRecord, Projection, ProjectionMetadata, ScenarioTable, AGE_BRACKETS,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a population with thousands separators.
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a projection trajectory table as a string.
pub fn format_trajectory_table(projection: &Projection) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Population Trajectory".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Year", "Population", "Change", "Change %"]);

    let mut previous: Option<u64> = None;
    for point in &projection.trajectory {
        let (change, change_pct) = match previous {
            Some(prev) => {
                let delta = point.population as i128 - prev as i128;
                let pct = if prev > 0 {
                    delta as f64 / prev as f64 * 100.0
                } else {
                    0.0
                };
                (format!("{delta:+}"), format!("{pct:+.2}%"))
            }
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(point.year),
            Cell::new(format_population(point.population)),
            Cell::new(change),
            Cell::new(change_pct),
        ]);
        previous = Some(point.population);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print a projection trajectory table.
pub fn print_trajectory_table(projection: &Projection) {
    print!("{}", format_trajectory_table(projection));
}

/// Format the assumptions and end state recorded with a projection.
pub fn format_projection_metadata(projection: &Projection) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Projection Assumptions".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Item", "Value"]);

    match &projection.metadata {
        ProjectionMetadata::Indicators {
            scenarios,
            final_indicators,
            final_rates,
            fallback_steps,
        } => {
            table.add_row(vec![
                Cell::new("Scenarios (GDP / life / urban)"),
                Cell::new(format!(
                    "{} / {} / {}",
                    scenarios.gdp, scenarios.life, scenarios.urban
                )),
            ]);
            table.add_row(vec![
                Cell::new("Final GDP per capita"),
                Cell::new(format!("{:.0}", final_indicators.gdp_per_capita)),
            ]);
            table.add_row(vec![
                Cell::new("Final life expectancy"),
                Cell::new(format!("{:.1}", final_indicators.life_expectancy)),
            ]);
            table.add_row(vec![
                Cell::new("Final urbanization"),
                Cell::new(format!("{:.1}%", final_indicators.urbanization)),
            ]);
            let rates = match final_rates {
                Some(r) => format!(
                    "birth {:.2}\u{2030}, death {:.2}\u{2030}, migration {:.2}\u{2030}",
                    r.birth, r.death, r.migration
                ),
                None => "heuristic only".to_string(),
            };
            table.add_row(vec![Cell::new("Final rates"), Cell::new(rates)]);
            table.add_row(vec![
                Cell::new("Heuristic steps"),
                Cell::new(fallback_steps),
            ]);
        }
        ProjectionMetadata::Rates {
            growth_rates,
            final_rates,
            held_steps,
        } => {
            table.add_row(vec![
                Cell::new("Growth rates (GDP / life / urban)"),
                Cell::new(format!(
                    "{}% / {}% / {}%",
                    growth_rates.gdp, growth_rates.life, growth_rates.urban
                )),
            ]);
            table.add_row(vec![
                Cell::new("Final rates"),
                Cell::new(format!(
                    "birth {:.2}\u{2030}, death {:.2}\u{2030}, migration {:.2}\u{2030}",
                    final_rates.birth, final_rates.death, final_rates.migration
                )),
            ]);
            table.add_row(vec![Cell::new("Held steps"), Cell::new(held_steps)]);
        }
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the projection assumptions table.
pub fn print_projection_metadata(projection: &Projection) {
    print!("{}", format_projection_metadata(projection));
}

/// Format the scenario table as a string.
pub fn format_scenario_table(scenarios: &ScenarioTable) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Scenarios".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec![
        "Scenario",
        "GDP growth / step",
        "Life exp. / step",
        "Urbanization / step",
    ]);
    for (scenario, effect) in scenarios.iter() {
        table.add_row(vec![
            Cell::new(scenario),
            Cell::new(format!("{:+.1}%", effect.gdp_mult * 100.0)),
            Cell::new(format!("{:+.1} yrs", effect.life_delta)),
            Cell::new(format!("{:+.1} pts", effect.urban_delta)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the scenario table.
pub fn print_scenario_table(scenarios: &ScenarioTable) {
    print!("{}", format_scenario_table(scenarios));
}

/// Format a country's seed data as a string.
pub fn format_country_summary(name: &str, country: &CountryRecord) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", format!("Country: {name}").bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let rates = country.rates();
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value", "Unit"]);
    table.add_row(vec![
        Cell::new("Population"),
        Cell::new(format_population(country.population)),
        Cell::new("persons"),
    ]);
    table.add_row(vec![
        Cell::new("GDP per capita"),
        Cell::new(format!("{:.0}", country.gdp_per_capita)),
        Cell::new("USD"),
    ]);
    table.add_row(vec![
        Cell::new("Life expectancy"),
        Cell::new(format!("{:.1}", country.life_expectancy)),
        Cell::new("years"),
    ]);
    table.add_row(vec![
        Cell::new("Urbanization"),
        Cell::new(format!("{:.1}", country.urbanization)),
        Cell::new("%"),
    ]);
    table.add_row(vec![
        Cell::new("Birth rate"),
        Cell::new(format!("{:.2}", rates.birth)),
        Cell::new("per 1000"),
    ]);
    table.add_row(vec![
        Cell::new("Death rate"),
        Cell::new(format!("{:.2}", rates.death)),
        Cell::new("per 1000"),
    ]);
    table.add_row(vec![
        Cell::new("Migration rate"),
        Cell::new(format!("{:.2}", rates.migration)),
        Cell::new("per 1000"),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

/// Print a country's seed data.
pub fn print_country_summary(name: &str, country: &CountryRecord) {
    print!("{}", format_country_summary(name, country));
}

/// Format an age pyramid, oldest bracket first, with its summary stats.
pub fn format_pyramid_table(title: &str, pyramid: &AgePyramid) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", title.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Age", "Male %", "Female %"]);
    for i in (0..AGE_BRACKETS.len()).rev() {
        table.add_row(vec![
            Cell::new(AGE_BRACKETS[i]),
            Cell::new(format!("{:.1}", pyramid.male[i])),
            Cell::new(format!("{:.1}", pyramid.female[i])),
        ]);
    }
    output.push_str(&format!("{table}\n"));

    let stats = pyramid.stats();
    output.push_str(&format!(
        "{}\n",
        format!(
            "Total: {:.1}% | Male: {:.1}% | Female: {:.1}% | Youth (0-19): {:.1}%",
            stats.total, stats.male_total, stats.female_total, stats.youth_ratio
        )
        .dimmed()
    ));
    output
}

/// Print an age pyramid table.
pub fn print_pyramid_table(title: &str, pyramid: &AgePyramid) {
    print!("{}", format_pyramid_table(title, pyramid));
}
