mod deferred;
mod formatter;
mod renderer;

pub use deferred::{DeferredUpdateRenderer, ForwardRefUpdater};
pub use formatter::{CodeFormatter, CommandFormatter};
pub use renderer::{ClassRenderer, ModelRenderer, python_literal};
