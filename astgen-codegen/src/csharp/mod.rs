//! C#-style class generation modules.

pub mod base;
pub mod fields;
pub mod nodes;
pub mod visitor;

pub use base::BaseClassGenerator;
pub use fields::FieldSyntax;
pub use nodes::NodeGenerator;
pub use visitor::VisitorGenerator;
