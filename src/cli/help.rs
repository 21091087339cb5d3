//! cli::help
//!
//! Help text rendered from the declarative option tree.
//!
//! Everything shown here comes from the display-only fields on the
//! definitions; no command needs to know how to print itself.

use crate::cli::option::CliOptionGroup;

/// Render the top-level help screen.
pub fn render(
    app_name: &str,
    description: Option<&str>,
    usage: Option<&str>,
    groups: &[CliOptionGroup],
) -> String {
    let mut out = String::new();
    if let Some(description) = description {
        out.push_str(description);
        out.push_str("\n\n");
    }
    out.push_str(&format!(
        "Usage: {}\n",
        usage.unwrap_or(app_name)
    ));
    for group in groups {
        out.push('\n');
        out.push_str(&group.description);
        out.push('\n');
        for option in &group.options {
            out.push_str(&format!(
                "  {:<22} {}\n",
                option.canonical_key(),
                option.description
            ));
            for argument in option.arguments() {
                let aliases = flag_aliases(&argument.keys);
                out.push_str(&format!("      {:<30} {}\n", aliases, argument.description));
            }
        }
    }
    out
}

/// Join the dashed aliases for display, leaving the env-style key out.
fn flag_aliases(keys: &[String]) -> String {
    let dashed: Vec<&str> = keys
        .iter()
        .filter(|key| key.starts_with('-'))
        .map(String::as_str)
        .collect();
    if dashed.is_empty() {
        keys.join(", ")
    } else {
        dashed.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::option::CliOption;

    #[test]
    fn renders_groups_commands_and_flags() {
        let build = CliOption::new(&["build", "BUILD"], "Build the package.").with_optional(vec![
            CliOption::new(&["-i", "--image-name", "BUILD_DOCKER_IMAGE_NAME"], "Docker image.")
                .requires_value(),
        ]);
        let groups = vec![CliOptionGroup::new("Commands:", vec![build])];

        let text = render(
            "capstan",
            Some("Release helper."),
            Some("capstan COMMAND [OPTIONS]"),
            &groups,
        );

        assert!(text.contains("Release helper."));
        assert!(text.contains("Usage: capstan COMMAND [OPTIONS]"));
        assert!(text.contains("Commands:"));
        assert!(text.contains("build"));
        assert!(text.contains("-i, --image-name"));
        // Env-style keys stay out of the flag listing.
        assert!(!text.contains("BUILD_DOCKER_IMAGE_NAME"));
    }
}
