/// Exact string equality on both this and [`BUILD_ID`] gates the
/// handshake ("version negotiation"). Tied to the crate version rather
/// than a hand-maintained constant so a coordinator and worker built from
/// the same release never drift.
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stands in for the original's compiled-in git hash: a second identity
/// check alongside `PROTOCOL_VERSION`, set at build time via the
/// `PATHFARM_BUILD_ID` environment variable and falling back to a
/// recognizable placeholder for local/dev builds.
pub const BUILD_ID: &str = match option_env!("PATHFARM_BUILD_ID") {
    Some(id) => id,
    None => "dev-build",
};

/// Default port 2222 (overridable).
pub const DEFAULT_PORT: u16 = 2222;
