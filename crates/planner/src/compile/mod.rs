pub mod alias;
pub mod compiler;
pub mod field;
pub mod join;
pub mod params;
pub mod rewrite;

pub use compiler::{CompiledQueries, CompiledQuery, QueryCompiler, QueryKind};
pub use params::QueryParams;
