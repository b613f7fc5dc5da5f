//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for the fatal startup errors of the binary.

use std::fmt::Write;

use crate::engine::ConfigError;

/// Format error for user consumption
///
/// Takes technical error and produces user-friendly message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    writeln!(output).ok();
    writeln!(
        output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(output).ok();

    let error_msg = error.to_string();
    let gesture_error = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ConfigError>());

    if let Some(config_error) = gesture_error {
        format_gesture_error(&mut output, config_error);
    } else if error_msg.contains("parse config") {
        format_syntax_error(&mut output);
    } else if error_msg.contains("config") {
        format_config_error(&mut output);
    } else if error_msg.contains("frame") || error_msg.contains("recording") {
        format_recording_error(&mut output);
    } else {
        format_generic_error(&mut output, &error_msg);
    }

    // Technical details
    writeln!(output).ok();
    writeln!(
        output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(output, "Technical Details:").ok();
    writeln!(output).ok();
    writeln!(output, "{:#}", error).ok();
    writeln!(output).ok();

    writeln!(
        output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(output, "Need Help?").ok();
    writeln!(
        output,
        "  - Run with --verbose for detailed logs: lamco-hand-pointer -vvv"
    )
    .ok();
    writeln!(
        output,
        "  - Print a working config: lamco-hand-pointer --print-default-config"
    )
    .ok();
    writeln!(
        output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();

    output
}

fn format_gesture_error(output: &mut String, error: &ConfigError) {
    writeln!(output, "Gesture Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "The gesture engine refused to start: {}", error).ok();
    writeln!(output).ok();
    writeln!(output, "Checklist:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Every key under [hands.*.actions] has one bit per finger").ok();
    writeln!(output, "     → 4 fingers need keys like \"1100\"").ok();
    writeln!(output, "     → Keys may only contain 0 and 1").ok();
    writeln!(output).ok();
    writeln!(output, "  2. open_angle lies strictly between 0 and 180").ok();
    writeln!(output).ok();
    writeln!(output, "  3. anchor and finger joints are landmark indices 0..=20").ok();
    writeln!(output).ok();
    writeln!(output, "  4. [cursor] movement_speed is at least 1").ok();
    writeln!(output, "     → The tracking region must have positive width and height").ok();
}

fn format_syntax_error(output: &mut String) {
    writeln!(output, "Configuration Syntax Error").ok();
    writeln!(output).ok();
    writeln!(output, "The configuration file is not valid TOML for this program.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output, "     → Gesture keys must be quoted: \"1100\" = \"scroll_down\"").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Unknown action name").ok();
    writeln!(
        output,
        "     → Valid: move, click, right_click, double_click, middle_click,"
    )
    .ok();
    writeln!(output, "       scroll_up, scroll_down, button_down, button_up").ok();
    writeln!(output).ok();
    writeln!(output, "  3. Unknown finger name").ok();
    writeln!(output, "     → Valid: thumb, index, middle, ring, pinky, or [tip, pip, base]").ok();
}

fn format_config_error(output: &mut String) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "Problem with configuration file.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Configuration file not readable").ok();
    writeln!(output, "     → Or specify: lamco-hand-pointer -c /path/to/config.toml").ok();
    writeln!(
        output,
        "     → Start from: lamco-hand-pointer --print-default-config > config.toml"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  2. Invalid log level").ok();
    writeln!(output, "     → Use one of trace, debug, info, warn, error").ok();
}

fn format_recording_error(output: &mut String) {
    writeln!(output, "Frame Recording Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not read the hand landmark recording.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. File not found").ok();
    writeln!(output, "     → Check the path passed to --frames").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Wrong format").ok();
    writeln!(output, "     → One JSON object per line:").ok();
    writeln!(
        output,
        "       {{\"hands\":[{{\"handedness\":\"Right\",\"landmarks\":[[x,y],...],\"width\":1280,\"height\":720}}]}}"
    )
    .ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Engine Error").ok();
    writeln!(output).ok();
    writeln!(output, "An error occurred while running the gesture engine.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
}
