//! Client Service

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::models::{normalize_email, Client, CreateClient, UpdateClient};
use crate::repository::ClientRepository;

pub struct ClientService<R: ClientRepository> {
    repository: Arc<R>,
}

impl<R: ClientRepository> ClientService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_clients(&self) -> ClientResult<Vec<Client>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_client(&self, id: Uuid) -> ClientResult<Client> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ClientError::NotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_client(&self, input: CreateClient) -> ClientResult<Client> {
        input.validate()?;

        let email = normalize_email(&input.email);
        if self.repository.exists_by_email(&email).await? {
            return Err(ClientError::DuplicateEmail(email));
        }

        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_client(&self, id: Uuid, input: UpdateClient) -> ClientResult<Client> {
        input.validate()?;

        let existing = self.get_client(id).await?;

        if let Some(email) = input.email.as_deref().map(normalize_email) {
            if email != existing.email && self.repository.exists_by_email(&email).await? {
                return Err(ClientError::DuplicateEmail(email));
            }
        }

        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_client(&self, id: Uuid) -> ClientResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: ClientRepository> Clone for ClientService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockClientRepository;
    use mockall::predicate::eq;

    fn input(email: &str) -> CreateClient {
        CreateClient {
            name: "Mateo".to_string(),
            last_name: "Gómez".to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_case_insensitively() {
        let mut mock_repo = MockClientRepository::new();
        mock_repo
            .expect_exists_by_email()
            .with(eq("mateo@example.com"))
            .returning(|_| Ok(true));
        mock_repo.expect_create().never();

        let service = ClientService::new(mock_repo);
        let result = service.create_client(input("Mateo@Example.com")).await;

        assert!(matches!(result, Err(ClientError::DuplicateEmail(e)) if e == "mateo@example.com"));
    }

    #[tokio::test]
    async fn test_create_new_email() {
        let mut mock_repo = MockClientRepository::new();
        mock_repo.expect_exists_by_email().returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .returning(|input| Ok(Client::new(input)));

        let service = ClientService::new(mock_repo);
        let client = service
            .create_client(input("mateo@example.com"))
            .await
            .unwrap();
        assert_eq!(client.email, "mateo@example.com");
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_skips_uniqueness_check() {
        let mut mock_repo = MockClientRepository::new();
        let existing = Client::new(input("mateo@example.com"));
        let id = existing.id;

        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_exists_by_email().never();
        mock_repo.expect_update().returning(|id, update| {
            let mut client = Client::new(CreateClient {
                name: "Mateo".to_string(),
                last_name: "Gómez".to_string(),
                email: "mateo@example.com".to_string(),
                phone: None,
                address: None,
            });
            client.id = id;
            client.apply_update(update);
            Ok(client)
        });

        let service = ClientService::new(mock_repo);
        let updated = service
            .update_client(
                id,
                UpdateClient {
                    email: Some("MATEO@example.com".to_string()),
                    phone: Some("+34 600 000 000".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.phone.as_deref(), Some("+34 600 000 000"));
    }

    #[tokio::test]
    async fn test_update_missing_client() {
        let mut mock_repo = MockClientRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ClientService::new(mock_repo);
        let result = service
            .update_client(Uuid::now_v7(), UpdateClient::default())
            .await;
        assert!(matches!(result, Err(ClientError::NotFound(_))));
    }
}
