#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("nothing to generate; use --where for a project or --module for a module")]
    NothingToGenerate,

    #[error("--where and --module can't be combined (got {project:?} and {module:?})")]
    Conflict { project: String, module: String },
}
