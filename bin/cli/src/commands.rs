//! Command implementations.
//!
//! Each command returns the text to print on stdout; errors are reported by
//! `main`. `save` and `execute` go through a [`GraphController`] loaded with
//! the document, so they get exactly the editor's validation.

use crate::cli::Command;
use crate::config::CliConfig;
use crate::error::CliError;
use flowcanvas_backend::HttpBackend;
use flowcanvas_catalog::NodeTypeCatalog;
use flowcanvas_core::Result;
use flowcanvas_editor::{GraphController, Submitter};
use flowcanvas_render::{ConnectionRenderer, render_svg};
use flowcanvas_workflow::Workflow;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs one command.
///
/// # Errors
///
/// Returns an error if the document cannot be read or is inconsistent, or
/// if the command itself fails.
pub async fn run(command: Command, config: &CliConfig) -> Result<String, CliError> {
    match command {
        Command::Check { file } => check(&file),
        Command::Render { file, output } => render(&file, output.as_deref(), config),
        Command::Save { file, name } => save(&file, name.as_deref(), config).await,
        Command::Execute { file } => execute(&file, config).await,
    }
}

/// Reads and parses a workflow document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_workflow(path: &Path) -> Result<Workflow, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::Read {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    let workflow = Workflow::from_json(&text).map_err(|e| CliError::Parse {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    debug!(
        path = %path.display(),
        nodes = workflow.graph.node_count(),
        connections = workflow.graph.connection_count(),
        "loaded workflow"
    );
    Ok(workflow)
}

fn check(path: &Path) -> Result<String, CliError> {
    let workflow = load_workflow(path)?;
    let graph = &workflow.graph;
    graph.check_integrity().map_err(|e| CliError::Integrity {
        details: e.to_string(),
    })?;

    Ok(format!(
        "{}: ok ({} nodes, {} connections, {} entry, {} terminal)\n",
        path.display(),
        graph.node_count(),
        graph.connection_count(),
        graph.entry_nodes().len(),
        graph.terminal_nodes().len()
    ))
}

fn render(
    path: &Path,
    output: Option<&Path>,
    config: &CliConfig,
) -> Result<String, CliError> {
    let workflow = load_workflow(path)?;
    workflow.graph.check_integrity().map_err(|e| CliError::Integrity {
        details: e.to_string(),
    })?;

    let renderer = ConnectionRenderer::new(config.render.clone());
    let svg = render_svg(&workflow.graph, &renderer);

    match output {
        Some(output) => {
            std::fs::write(output, &svg).map_err(|e| CliError::Write {
                path: output.to_path_buf(),
                details: e.to_string(),
            })?;
            info!(path = %output.display(), "wrote SVG");
            Ok(String::new())
        }
        None => Ok(svg),
    }
}

async fn save(
    path: &Path,
    name: Option<&str>,
    config: &CliConfig,
) -> Result<String, CliError> {
    let workflow = load_workflow(path)?;
    let name = name.map_or_else(|| workflow.name.clone(), str::to_string);
    let controller = controller_for(workflow, config)?;

    let receipt = controller
        .save(&name)
        .await
        .map_err(|e| CliError::Editor {
            details: e.to_string(),
        })?;
    Ok(format!(
        "saved '{name}' as {} at {}\n",
        receipt.workflow_id,
        receipt.saved_at.to_rfc3339()
    ))
}

async fn execute(path: &Path, config: &CliConfig) -> Result<String, CliError> {
    let workflow = load_workflow(path)?;
    let controller = controller_for(workflow, config)?;

    let receipt = controller.execute().await.map_err(|e| CliError::Editor {
        details: e.to_string(),
    })?;
    Ok(format!(
        "queued run {} at {}\n",
        receipt.run_id,
        receipt.queued_at.to_rfc3339()
    ))
}

fn controller_for(
    workflow: Workflow,
    config: &CliConfig,
) -> Result<GraphController, CliError> {
    let backend_config = config.backend.as_ref().ok_or(CliError::MissingBackend)?;
    let backend = Arc::new(HttpBackend::new(backend_config).map_err(|e| CliError::Backend {
        details: e.to_string(),
    })?);

    let submitter = Submitter::new(backend.clone(), backend);
    let mut controller = GraphController::new(NodeTypeCatalog::builtin(), submitter);
    controller.load(workflow).map_err(|e| CliError::Integrity {
        details: e.to_string(),
    })?;
    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcanvas_backend::BackendConfig;
    use flowcanvas_core::{NodeId, Point};
    use flowcanvas_workflow::{Connection, PortRef};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn delay_to_email() -> Workflow {
        let catalog = NodeTypeCatalog::builtin();
        let mut workflow = Workflow::new("Reminder");
        let delay = workflow
            .graph
            .add_node(catalog.instantiate("delay", Point::new(100.0, 100.0)).expect("delay"))
            .expect("add");
        let email = workflow
            .graph
            .add_node(catalog.instantiate("email", Point::new(400.0, 100.0)).expect("email"))
            .expect("add");
        workflow
            .graph
            .connect(PortRef::new(delay, "output"), PortRef::new(email, "input"))
            .expect("connect");
        workflow
    }

    fn write_temp(workflow: &Workflow) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(workflow.to_json_pretty().expect("serialize").as_bytes())
            .expect("write");
        file
    }

    #[test]
    fn check_reports_counts() {
        let file = write_temp(&delay_to_email());
        let report = check(file.path()).expect("consistent");
        assert!(report.contains("2 nodes, 1 connections, 1 entry, 1 terminal"));
    }

    #[test]
    fn check_rejects_dangling_connection() {
        let mut workflow = delay_to_email();
        let from = workflow.graph.nodes[0].id;
        workflow.graph.connections.push(Connection::new(
            PortRef::new(from, "output"),
            PortRef::new(NodeId::new(), "input"),
        ));
        let file = write_temp(&workflow);

        assert!(check(file.path()).is_err());
    }

    #[test]
    fn unreadable_and_malformed_files_fail() {
        assert!(load_workflow(Path::new("/nonexistent/flow.json")).is_err());

        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"{ not json").expect("write");
        assert!(load_workflow(file.path()).is_err());
    }

    #[test]
    fn render_writes_svg_file() {
        let file = write_temp(&delay_to_email());
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("flow.svg");

        let stdout = render(file.path(), Some(&output), &CliConfig::default()).expect("render");
        assert!(stdout.is_empty());

        let svg = std::fs::read_to_string(&output).expect("svg written");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("output → input"));
    }

    #[test]
    fn render_to_stdout_uses_configured_layout() {
        let file = write_temp(&delay_to_email());
        let mut config = CliConfig::default();
        config.render.node_width = 200.0;

        let svg = render(file.path(), None, &config).expect("render");
        // Source anchor is the delay node's right edge: 100 + 200.
        assert!(svg.contains("M 300 140 C"));
    }

    #[tokio::test]
    async fn save_without_backend_fails_before_any_request() {
        let file = write_temp(&delay_to_email());
        let result = run(
            Command::Save {
                file: file.path().to_path_buf(),
                name: None,
            },
            &CliConfig::default(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn save_of_empty_workflow_is_rejected_locally() {
        let file = write_temp(&Workflow::new("Empty"));
        let config = CliConfig {
            backend: Some(BackendConfig::new("http://127.0.0.1:9")),
            ..CliConfig::default()
        };

        let err = save(file.path(), None, &config).await.unwrap_err();
        assert!(err.to_string().contains("add at least one node"));
    }
}
