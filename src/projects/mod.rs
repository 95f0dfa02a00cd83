/// Portfolio catalog: categories, projects, images and stats per tenant

pub mod repository;
pub mod types;

pub use repository::{ProjectsRepository, PROJECTS_DDL};
pub use types::{Category, Project, ProjectDetail, ProjectFilter, ProjectListItem, ProjectStatus};
