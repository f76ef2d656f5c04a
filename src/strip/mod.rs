pub(crate) mod assembler;
pub(crate) mod scene;
pub(crate) mod snapshot;
