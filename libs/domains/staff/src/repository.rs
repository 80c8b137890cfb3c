use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StaffResult;
use crate::models::{CreateEmployee, CreateVet, Employee, UpdateEmployee, UpdateVet, Vet};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, input: CreateEmployee) -> StaffResult<Employee>;

    async fn get_by_id(&self, id: Uuid) -> StaffResult<Option<Employee>>;

    async fn list(&self) -> StaffResult<Vec<Employee>>;

    async fn update(&self, id: Uuid, input: UpdateEmployee) -> StaffResult<Employee>;

    async fn delete(&self, id: Uuid) -> StaffResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VetRepository: Send + Sync {
    /// Insert a vet; `DuplicateVet` on a unique index violation
    async fn create(&self, input: CreateVet) -> StaffResult<Vet>;

    async fn get_by_id(&self, id: Uuid) -> StaffResult<Option<Vet>>;

    async fn list(&self) -> StaffResult<Vec<Vet>>;

    async fn update(&self, id: Uuid, input: UpdateVet) -> StaffResult<Vet>;

    async fn delete(&self, id: Uuid) -> StaffResult<()>;

    /// Whether any vet uses `email` (normalized)
    async fn exists_by_email(&self, email: &str) -> StaffResult<bool>;

    /// Whether any vet uses `tax_id` (normalized)
    async fn exists_by_tax_id(&self, tax_id: &str) -> StaffResult<bool>;
}
