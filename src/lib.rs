pub mod core;

pub use core::projects::{
    ActiveSelection, ProjectService, ProjectsError, ProjectsStore, ProjectsView, ResourceStores,
    Route,
};
