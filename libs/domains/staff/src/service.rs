//! Employee and Vet services

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{StaffError, StaffResult};
use crate::models::{
    normalize_email, normalize_tax_id, CreateEmployee, CreateVet, Employee, UpdateEmployee,
    UpdateVet, Vet,
};
use crate::repository::{EmployeeRepository, VetRepository};

pub struct EmployeeService<R: EmployeeRepository> {
    repository: Arc<R>,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_employees(&self) -> StaffResult<Vec<Employee>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_employee(&self, id: Uuid) -> StaffResult<Employee> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StaffError::EmployeeNotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_employee(&self, input: CreateEmployee) -> StaffResult<Employee> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_employee(&self, id: Uuid, input: UpdateEmployee) -> StaffResult<Employee> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_employee(&self, id: Uuid) -> StaffResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: EmployeeRepository> Clone for EmployeeService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

pub struct VetService<R: VetRepository> {
    repository: Arc<R>,
}

impl<R: VetRepository> VetService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_vets(&self) -> StaffResult<Vec<Vet>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_vet(&self, id: Uuid) -> StaffResult<Vet> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StaffError::VetNotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_vet(&self, input: CreateVet) -> StaffResult<Vet> {
        input.validate()?;

        self.ensure_email_free(&normalize_email(&input.email)).await?;
        self.ensure_tax_id_free(&normalize_tax_id(&input.tax_id))
            .await?;

        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_vet(&self, id: Uuid, input: UpdateVet) -> StaffResult<Vet> {
        input.validate()?;

        let existing = self.get_vet(id).await?;

        if let Some(email) = input.email.as_deref().map(normalize_email) {
            if email != existing.email {
                self.ensure_email_free(&email).await?;
            }
        }
        if let Some(tax_id) = input.tax_id.as_deref().map(normalize_tax_id) {
            if tax_id != existing.tax_id {
                self.ensure_tax_id_free(&tax_id).await?;
            }
        }

        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_vet(&self, id: Uuid) -> StaffResult<()> {
        self.repository.delete(id).await
    }

    async fn ensure_email_free(&self, email: &str) -> StaffResult<()> {
        if self.repository.exists_by_email(email).await? {
            return Err(StaffError::DuplicateVet {
                field: "email",
                value: email.to_string(),
            });
        }
        Ok(())
    }

    async fn ensure_tax_id_free(&self, tax_id: &str) -> StaffResult<()> {
        if self.repository.exists_by_tax_id(tax_id).await? {
            return Err(StaffError::DuplicateVet {
                field: "taxId",
                value: tax_id.to_string(),
            });
        }
        Ok(())
    }
}

impl<R: VetRepository> Clone for VetService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
