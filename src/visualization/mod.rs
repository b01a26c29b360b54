mod tables;

pub use tables::{
    format_country_summary, format_population, format_projection_metadata, format_pyramid_table,
    format_scenario_table, format_trajectory_table, print_country_summary,
    print_projection_metadata, print_pyramid_table, print_scenario_table, print_trajectory_table,
};
