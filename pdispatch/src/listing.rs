//! Human-readable rendering of the available tools.

use std::fmt::Write;

use pprovider::ToolDefinition;

/// Tools come from the tools file as local commands, not from an MCP server,
/// so the header names no protocol.
pub const TOOL_LISTING_HEADER: &str = "Available tools:";
pub const NO_TOOLS_LINE: &str = "  (No tools available)";

/// Renders a blank line, the header, one `  - name: description` line per
/// tool (or the no-tools line) and a trailing blank line.
pub fn render_tool_listing(tools: &[ToolDefinition]) -> String {
    let mut out = format!("\n{TOOL_LISTING_HEADER}\n");
    if tools.is_empty() {
        out.push_str(NO_TOOLS_LINE);
        out.push('\n');
    }

    for tool in tools {
        let _ = writeln!(out, "  - {}: {}", tool.name, tool.description);
    }

    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_has_placeholder_line() {
        // Local command tools, not MCP: the header stays protocol-neutral.
        assert_eq!(
            render_tool_listing(&[]),
            "\nAvailable tools:\n  (No tools available)\n\n"
        );
    }

    #[test]
    fn tools_render_in_given_order() {
        let tools = vec![
            ToolDefinition {
                name: "utc_time".to_string(),
                description: "Current UTC time".to_string(),
                input_schema: "{}".to_string(),
            },
            ToolDefinition {
                name: "disk_usage".to_string(),
                description: "Free space on /".to_string(),
                input_schema: "{}".to_string(),
            },
        ];

        assert_eq!(
            render_tool_listing(&tools),
            "\nAvailable tools:\n  - utc_time: Current UTC time\n  - disk_usage: Free space on /\n\n"
        );
    }
}
