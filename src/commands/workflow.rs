//! Custom workflow command handlers
//! Resolve a named workflow's command templates into runnable terminal lines:
//! substitute `<<<PLACEHOLDER>>>` tokens from repository attributes or an
//! interactive prompt, then decide how the lines reach the shell.

use crate::error::{BranchviewError, Result};
use crate::models::{NodeKind, TreeNode};

const TOKEN_OPEN: &str = "<<<";
const TOKEN_CLOSE: &str = ">>>";

/// Repository attributes available to workflow templates
#[derive(Debug, Clone)]
pub struct RepositoryAttrs {
    pub name: String,
    pub branch: String,
    pub path: String,
}

impl RepositoryAttrs {
    /// Derive attributes from a repository node labeled `"name - branch"`
    pub fn from_node(node: &TreeNode) -> Result<Self> {
        if node.kind != NodeKind::Repository {
            return Err(BranchviewError::InvalidPath(node.path.clone()));
        }
        let (name, branch) = node
            .label
            .split_once(" - ")
            .ok_or_else(|| BranchviewError::OperationFailed(format!(
                "Repository label '{}' carries no branch",
                node.label
            )))?;
        Ok(RepositoryAttrs {
            name: name.to_string(),
            branch: branch.to_string(),
            path: node.path.clone(),
        })
    }

    /// Branch name with a leading `prefix/` stripped (e.g. `feature/x` → `x`)
    fn branch_without_prefix(&self) -> &str {
        match self.branch.split_once('/') {
            Some((_, rest)) => rest,
            None => &self.branch,
        }
    }

    fn known_placeholder(&self, token: &str) -> Option<String> {
        match token {
            "$REPOSITORY_NAME" => Some(self.name.clone()),
            "$REPOSITORY_BRANCH" => Some(self.branch.clone()),
            "$REPOSITORY_BRANCH_WITHOUT_PREFIX" => Some(self.branch_without_prefix().to_string()),
            "$REPOSITORY_PATH" => Some(self.path.clone()),
            _ => None,
        }
    }
}

/// A workflow with every placeholder substituted, ready for a terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRun {
    pub name: String,
    pub commands: Vec<String>,
    /// Working directory for the terminal
    pub cwd: String,
}

/// Resolve a workflow's templates against repository attributes.
///
/// Unknown placeholders are resolved through `prompt`; returning `None` (the
/// user dismissed the input) aborts the whole workflow, signalled as
/// `Ok(None)`.
pub fn resolve_workflow(
    name: &str,
    templates: &[String],
    attrs: &RepositoryAttrs,
    prompt: &mut dyn FnMut(&str) -> Option<String>,
) -> Result<Option<WorkflowRun>> {
    let mut commands = Vec::with_capacity(templates.len());

    for template in templates {
        let mut command = template.clone();
        // Tokens are collected from the template up front; substituted values
        // are opaque text and never resolved again.
        for token in template_tokens(template) {
            let value = match attrs.known_placeholder(&token) {
                Some(value) => value,
                None => match prompt(&token) {
                    Some(value) if !value.is_empty() => value,
                    _ => {
                        tracing::info!(workflow = name, token = token.as_str(), "workflow aborted at prompt");
                        return Ok(None);
                    }
                },
            };
            command = command.replacen(&format!("{TOKEN_OPEN}{token}{TOKEN_CLOSE}"), &value, 1);
        }
        commands.push(command);
    }

    Ok(Some(WorkflowRun {
        name: name.to_string(),
        commands,
        cwd: attrs.path.clone(),
    }))
}

/// Every `<<<…>>>` token in `template`, in order of appearance and without
/// the delimiters; repeated tokens appear once per occurrence
fn template_tokens(template: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find(TOKEN_OPEN) {
        let after = &rest[start + TOKEN_OPEN.len()..];
        let Some(end) = after.find(TOKEN_CLOSE) else {
            break;
        };
        tokens.push(after[..end].to_string());
        rest = &after[end + TOKEN_CLOSE.len()..];
    }
    tokens
}

/// The text lines to send to a terminal for this run.
///
/// With chaining the commands collapse into one `&&`-joined line so a failing
/// step stops the rest; without it they are sent one per line.
pub fn shell_lines(run: &WorkflowRun, use_chaining: bool) -> Vec<String> {
    if use_chaining {
        vec![run.commands.join(" && ")]
    } else {
        run.commands.clone()
    }
}

/// Shell to launch the workflow terminal with.
///
/// Legacy PowerShell (the likely default on Windows) only supports `&&` from
/// version 7, so chained runs are steered to `cmd.exe` there.
pub fn terminal_shell(default_shell: &str, use_chaining: bool) -> String {
    if use_chaining && default_shell.to_lowercase().contains("powershell") {
        "cmd.exe".to_string()
    } else {
        default_shell.to_string()
    }
}
