// Directory lookups (employees, departments, positions) and the one write
// endpoint, employee update.

pub mod departments;
pub mod employees;
pub mod positions;
pub mod update;
pub mod validate;

pub use departments::{department_employees_get, department_get, departments_get};
pub use employees::{employee_events_get, employee_get, employees_get};
pub use positions::positions_get;
pub use update::employee_put;
