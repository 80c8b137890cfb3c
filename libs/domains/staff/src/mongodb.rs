//! MongoDB implementations of the staff repositories

use async_trait::async_trait;
use database::mongodb::is_duplicate_key;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, Database, IndexModel};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{StaffError, StaffResult};
use crate::models::{CreateEmployee, CreateVet, Employee, UpdateEmployee, UpdateVet, Vet};
use crate::repository::{EmployeeRepository, VetRepository};

pub const EMPLOYEES_COLLECTION: &str = "employees";
pub const VETS_COLLECTION: &str = "vets";

const VET_EMAIL_INDEX: &str = "email_unique";
const VET_TAX_ID_INDEX: &str = "tax_id_unique";

pub struct MongoEmployeeRepository {
    collection: Collection<Employee>,
}

impl MongoEmployeeRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Employee>(EMPLOYEES_COLLECTION),
        }
    }
}

#[async_trait]
impl EmployeeRepository for MongoEmployeeRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateEmployee) -> StaffResult<Employee> {
        let employee = Employee::new(input);
        self.collection.insert_one(&employee).await?;

        tracing::info!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> StaffResult<Option<Employee>> {
        Ok(self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StaffResult<Vec<Employee>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateEmployee) -> StaffResult<Employee> {
        let filter = doc! { "_id": id.to_string() };
        let mut employee = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(StaffError::EmployeeNotFound(id))?;

        employee.apply_update(input);
        let result = self.collection.replace_one(filter, &employee).await?;

        if result.matched_count == 0 {
            return Err(StaffError::EmployeeNotFound(id));
        }

        tracing::info!(employee_id = %id, "Employee updated");
        Ok(employee)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StaffResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(StaffError::EmployeeNotFound(id));
        }

        tracing::info!(employee_id = %id, "Employee deleted");
        Ok(())
    }
}

pub struct MongoVetRepository {
    collection: Collection<Vet>,
}

impl MongoVetRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Vet>(VETS_COLLECTION),
        }
    }

    /// Unique indexes on `email` and `taxId`
    pub async fn init_indexes(&self) -> StaffResult<()> {
        let indexes = [("email", VET_EMAIL_INDEX), ("taxId", VET_TAX_ID_INDEX)]
            .into_iter()
            .map(|(field, name)| {
                IndexModel::builder()
                    .keys(doc! { field: 1 })
                    .options(
                        IndexOptions::builder()
                            .unique(true)
                            .name(name.to_string())
                            .build(),
                    )
                    .build()
            });

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Vet indexes initialized");
        Ok(())
    }

    /// The server names the violated index in its message
    fn map_write_error(err: mongodb::error::Error, vet: &Vet) -> StaffError {
        if !is_duplicate_key(&err) {
            return err.into();
        }

        if err.to_string().contains(VET_TAX_ID_INDEX) {
            StaffError::DuplicateVet {
                field: "taxId",
                value: vet.tax_id.clone(),
            }
        } else {
            StaffError::DuplicateVet {
                field: "email",
                value: vet.email.clone(),
            }
        }
    }
}

#[async_trait]
impl VetRepository for MongoVetRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateVet) -> StaffResult<Vet> {
        let vet = Vet::new(input);
        self.collection
            .insert_one(&vet)
            .await
            .map_err(|e| Self::map_write_error(e, &vet))?;

        tracing::info!(vet_id = %vet.id, "Vet created");
        Ok(vet)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> StaffResult<Option<Vet>> {
        Ok(self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StaffResult<Vec<Vet>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateVet) -> StaffResult<Vet> {
        let filter = doc! { "_id": id.to_string() };
        let mut vet = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(StaffError::VetNotFound(id))?;

        vet.apply_update(input);
        let result = self
            .collection
            .replace_one(filter, &vet)
            .await
            .map_err(|e| Self::map_write_error(e, &vet))?;

        if result.matched_count == 0 {
            return Err(StaffError::VetNotFound(id));
        }

        tracing::info!(vet_id = %id, "Vet updated");
        Ok(vet)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StaffResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(StaffError::VetNotFound(id));
        }

        tracing::info!(vet_id = %id, "Vet deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> StaffResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn exists_by_tax_id(&self, tax_id: &str) -> StaffResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "taxId": tax_id })
            .await?;
        Ok(count > 0)
    }
}
