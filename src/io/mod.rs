mod json_io;

pub use json_io::{
    projection_to_json, read_countries_from_bytes, read_countries_json, read_projection_json,
    write_projection_json,
};
