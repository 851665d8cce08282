pub mod books;

use bookshelf_kernel::{ModuleRegistry, Settings};

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) {
    registry.register(books::create_module(&settings.books));
}
