use crate::error::CliError;
use engine_runtime::execution::executor::RunOutput;
use engine_config::report::summary::RunSummary;
use model::records::row::RowRecord;
use serde::Serialize;

/// Hand-off document for the report stage.
#[derive(Serialize)]
struct Handoff<'a> {
    summary: &'a RunSummary,
    rows: &'a [RowRecord],
}

fn generate_output_json(output: &RunOutput) -> Result<String, CliError> {
    let handoff = Handoff {
        summary: &output.summary,
        rows: &output.rows,
    };
    Ok(serde_json::to_string_pretty(&handoff)?)
}

pub async fn write_output(output: &RunOutput, path: &str) -> Result<(), CliError> {
    let json = generate_output_json(output)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

pub async fn print_output(output: &RunOutput) -> Result<(), CliError> {
    let json = generate_output_json(output)?;
    println!("{json}");
    Ok(())
}
