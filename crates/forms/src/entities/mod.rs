//! ERP resources: record shape, form fields and endpoint per entity.

pub mod budget;
pub mod department;
pub mod employee;
pub mod holiday;
pub mod inventory_item;
pub mod leave;
pub mod payroll;
pub mod position;
pub mod purchase_order;
pub mod vendor;

pub use budget::{Budget, BudgetStore, Budgets};
pub use department::{Department, DepartmentStore, Departments};
pub use employee::{Employee, EmployeeStore, Employees};
pub use holiday::{Holiday, HolidayStore, Holidays};
pub use inventory_item::{InventoryItem, InventoryItemStore, InventoryItems};
pub use leave::{Leave, LeaveStore, Leaves};
pub use payroll::{Payroll, PayrollStore, Payrolls};
pub use position::{Position, PositionStore, Positions};
pub use purchase_order::{PurchaseOrder, PurchaseOrderStore, PurchaseOrders};
pub use vendor::{Vendor, VendorStore, Vendors};
