use std::io::{self, BufWriter};

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};
use tracing::info_span;

use userfeed_cli::pipeline::{OutputConfig, RunConfig, run};
use userfeed_model::{ValidationOptions, Violation};
use userfeed_output::{JsonLinesSink, TextLineSink};
use userfeed_validate::{
    MAX_CITY_LENGTH, MAX_COUNTRY_LENGTH, MAX_EMAIL_LENGTH, MAX_IDENTIFY_DOCUMENT_LENGTH,
    MAX_NAME_LENGTH,
};

use crate::cli::{AcceptedFormatArg, ValidateArgs};
use crate::summary::{align_column, apply_table_style, field_cell, header_cell};
use crate::types::RunResult;

pub fn run_rules() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Field"),
        header_cell("Reason"),
        header_cell("Rule"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, violation) in Violation::ALL.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            field_cell(violation.field().name()),
            Cell::new(violation.label()),
            Cell::new(rule_text(*violation)),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<RunResult> {
    let _span = info_span!("validate", input = %args.input.display()).entered();
    let options = if args.strict_length {
        ValidationOptions::strict_length()
    } else {
        ValidationOptions::default()
    };
    let config = RunConfig {
        input: args.input.clone(),
        options,
        output: OutputConfig {
            rejections: args.rejections.clone(),
            report_json: args.report_json.clone(),
        },
    };

    let stdout = BufWriter::new(io::stdout().lock());
    let outcome = match args.accepted_format {
        AcceptedFormatArg::Text => run(&config, TextLineSink::new(stdout))?,
        AcceptedFormatArg::Json => run(&config, JsonLinesSink::new(stdout))?,
    };
    Ok(RunResult::from(outcome))
}

fn rule_text(violation: Violation) -> String {
    match violation {
        Violation::EmailRequired
        | Violation::FirstNameRequired
        | Violation::LastNameRequired
        | Violation::IdentifyDocumentRequired
        | Violation::LatitudeRequired
        | Violation::LongitudeRequired
        | Violation::CityRequired
        | Violation::CountryRequired => "must not be empty".to_string(),
        Violation::EmailLength => length_text(MAX_EMAIL_LENGTH),
        Violation::FirstNameLength | Violation::LastNameLength => length_text(MAX_NAME_LENGTH),
        Violation::IdentifyDocumentLength => length_text(MAX_IDENTIFY_DOCUMENT_LENGTH),
        Violation::CityLength => length_text(MAX_CITY_LENGTH),
        Violation::CountryLength => length_text(MAX_COUNTRY_LENGTH),
        Violation::EmailFormat => "RFC 5322 mailbox".to_string(),
        Violation::LatitudeNotFloat | Violation::LongitudeNotFloat => {
            "32-bit float".to_string()
        }
    }
}

fn length_text(max: usize) -> String {
    format!("at most {max} bytes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_has_text() {
        for violation in Violation::ALL {
            assert!(!rule_text(violation).is_empty());
        }
        assert_eq!(rule_text(Violation::CountryLength), "at most 2 bytes");
        assert_eq!(rule_text(Violation::IdentifyDocumentLength), "at most 40 bytes");
    }
}
