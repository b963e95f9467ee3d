#[derive(Debug, thiserror::Error)]
pub enum Error {
    // config
    #[error("failed to load project config")]
    Config,
    #[error("no target named `{0}`")]
    NoTarget(String),

    // resolve
    #[error("failed to resolve target layout")]
    Resolve,
    #[error("failed to write layout")]
    Output,

    // check
    #[error("object name collisions found in {0} target(s)")]
    Collision(usize),
}

impl objcommon::system::Context for Error {}
