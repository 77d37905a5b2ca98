use rest_connector_core::decode_map;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

pub fn decode_cmd(value: &str, output: OutputArgs) -> i32 {
    match decode_map(value) {
        Ok(map) => {
            if output.format == OutputFormat::Text && !output.quiet {
                for (k, v) in &map {
                    println!("{k}={v}");
                }
            } else {
                print_result(output.format, output.quiet, &map);
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            exit_codes::INVALID_INPUT
        }
    }
}
