//! Workspace root package. Exists only to host repository tooling such as the
//! pre-commit hooks; see `crates/` for the actual library and CLI.
