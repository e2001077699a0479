use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::tools::ToolResponse;
use crate::tools::schema::tool_schemas;
use serde_json::Value;

use super::open_dispatcher;

/// Handle `call`: the JSON envelope is always printed, even on failure
pub fn handle_call(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Call { tool, args } = cmd else {
        return Ok(());
    };

    let parsed: AppResult<Value> = match args.as_deref().map(str::trim) {
        None | Some("") => Ok(Value::Null),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidArguments(format!("--args is not valid JSON: {}", e))),
    };

    let result = match parsed {
        Ok(args) => open_dispatcher(cfg).call(tool, args),
        Err(e) => ToolResponse::<()>::from_error(&e).to_json(),
    };
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Handle `tools`: print the schema of every tool
pub fn handle_tools() -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(&tool_schemas())?);
    Ok(())
}
