//! Single-shot and interactive front ends over a [`PromptDispatcher`].
//!
//! Everything the user should see goes to the `out` writer; diagnostics go
//! through `tracing` and interactive errors to the `err` writer.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{DEFAULT_MODEL, PromptDispatcher, PromptRequest};

pub const INTERACTIVE_PROMPT: &str = "> ";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    Empty,
    Exit,
    Tools,
    ClearModel,
    SetModel(String),
    Prompt(String),
}

impl InteractiveCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        match line {
            "/exit" | "/quit" => return Self::Exit,
            "/tools" => return Self::Tools,
            "/model" => return Self::ClearModel,
            _ => {}
        }

        if let Some(model) = line.strip_prefix("/model ") {
            let model = model.trim();
            if model.is_empty() {
                return Self::ClearModel;
            }
            return Self::SetModel(model.to_string());
        }

        Self::Prompt(line.to_string())
    }
}

/// Prints `Model: <id>` once the request is known to be routable, then the
/// answer text.
pub async fn answer<W: Write>(
    dispatcher: &PromptDispatcher,
    request: PromptRequest,
    out: &mut W,
) -> Result<()> {
    let plan = dispatcher.plan(&request)?;
    writeln!(out, "Model: {}", plan.model_id())?;
    out.flush()?;

    let response = dispatcher.dispatch_request(request).await?;
    tracing::debug!(
        provider = %response.provider,
        model = %response.model,
        stop_reason = ?response.stop_reason,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "response received"
    );

    writeln!(out, "{}", response.text)?;
    out.flush()?;
    Ok(())
}

pub async fn run_single<W: Write>(
    dispatcher: &PromptDispatcher,
    request: PromptRequest,
    out: &mut W,
) -> Result<()> {
    dispatcher.print_tools(out)?;
    answer(dispatcher, request, out).await
}

/// Reads prompts until `/exit`, `/quit` or end of input. A failed prompt is
/// reported on `err` and the session continues.
pub async fn run_interactive<R, W, E>(
    dispatcher: &PromptDispatcher,
    input: R,
    out: &mut W,
    err: &mut E,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    E: Write,
{
    dispatcher.print_tools(out)?;

    let mut model_override: Option<String> = None;
    let mut lines = input.lines();

    loop {
        write!(out, "{INTERACTIVE_PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match InteractiveCommand::parse(&line) {
            InteractiveCommand::Empty => {}
            InteractiveCommand::Exit => break,
            InteractiveCommand::Tools => dispatcher.print_tools(out)?,
            InteractiveCommand::ClearModel => {
                model_override = None;
                writeln!(out, "Model override cleared; using {DEFAULT_MODEL}")?;
            }
            InteractiveCommand::SetModel(model) => {
                writeln!(out, "Model override set to {model}")?;
                model_override = Some(model);
            }
            InteractiveCommand::Prompt(text) => {
                let mut request = PromptRequest::new(text);
                request.model_override = model_override.clone();
                if let Err(error) = answer(dispatcher, request, out).await {
                    writeln!(err, "error: {error:#}")?;
                    err.flush()?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(InteractiveCommand::parse("   "), InteractiveCommand::Empty);
        assert_eq!(InteractiveCommand::parse("/exit"), InteractiveCommand::Exit);
        assert_eq!(InteractiveCommand::parse(" /quit "), InteractiveCommand::Exit);
        assert_eq!(InteractiveCommand::parse("/tools"), InteractiveCommand::Tools);
        assert_eq!(
            InteractiveCommand::parse("/model"),
            InteractiveCommand::ClearModel
        );
        assert_eq!(
            InteractiveCommand::parse("/model   "),
            InteractiveCommand::ClearModel
        );
        assert_eq!(
            InteractiveCommand::parse("/model gpt-4o"),
            InteractiveCommand::SetModel("gpt-4o".to_string())
        );
    }

    #[test]
    fn other_lines_are_prompts() {
        assert_eq!(
            InteractiveCommand::parse("  what is /model for?  "),
            InteractiveCommand::Prompt("what is /model for?".to_string())
        );
        assert_eq!(
            InteractiveCommand::parse("/models"),
            InteractiveCommand::Prompt("/models".to_string())
        );
    }
}
