//! MySQL implementation of the AttachmentRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use nbj_core::domain::entities::attachment::MaintenanceRequestFile;
use nbj_core::errors::DomainError;
use nbj_core::repositories::AttachmentRepository;

use super::{column, db_error, enum_column};

const FILE_COLUMNS: &str = "id, maintenance_request_id, original_file_name, file_name, file_path, \
     content_type, file_size, file_extension, attachment_type, description, uploaded_at";

pub struct MySqlAttachmentRepository {
    pool: MySqlPool,
}

impl MySqlAttachmentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_file(row: &MySqlRow) -> Result<MaintenanceRequestFile, DomainError> {
        Ok(MaintenanceRequestFile {
            id: column(row, "id")?,
            maintenance_request_id: column(row, "maintenance_request_id")?,
            original_file_name: column(row, "original_file_name")?,
            file_name: column(row, "file_name")?,
            file_path: column(row, "file_path")?,
            content_type: column(row, "content_type")?,
            file_size: column(row, "file_size")?,
            file_extension: column(row, "file_extension")?,
            attachment_type: enum_column(row, "attachment_type")?,
            description: column(row, "description")?,
            uploaded_at: column(row, "uploaded_at")?,
        })
    }
}

#[async_trait]
impl AttachmentRepository for MySqlAttachmentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceRequestFile>, DomainError> {
        let query = format!("SELECT {} FROM maintenance_request_files WHERE id = ?", FILE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find file", e))?;
        row.as_ref().map(Self::row_to_file).transpose()
    }

    async fn find_by_request(
        &self,
        request_id: i64,
    ) -> Result<Vec<MaintenanceRequestFile>, DomainError> {
        let query = format!(
            "SELECT {} FROM maintenance_request_files WHERE maintenance_request_id = ? \
             ORDER BY uploaded_at, id",
            FILE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(request_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list request files", e))?;
        rows.iter().map(Self::row_to_file).collect()
    }

    async fn create(
        &self,
        mut file: MaintenanceRequestFile,
    ) -> Result<MaintenanceRequestFile, DomainError> {
        let query = r#"
            INSERT INTO maintenance_request_files (
                maintenance_request_id, original_file_name, file_name, file_path, content_type,
                file_size, file_extension, attachment_type, description, uploaded_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(file.maintenance_request_id)
            .bind(&file.original_file_name)
            .bind(&file.file_name)
            .bind(&file.file_path)
            .bind(&file.content_type)
            .bind(file.file_size)
            .bind(&file.file_extension)
            .bind(file.attachment_type.as_str())
            .bind(&file.description)
            .bind(file.uploaded_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save file record", e))?;

        file.id = result.last_insert_id() as i64;
        Ok(file)
    }

    async fn delete_by_request(&self, request_id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM maintenance_request_files WHERE maintenance_request_id = ?")
            .bind(request_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete request files", e))?;
        Ok(result.rows_affected())
    }

    async fn find_orphaned(&self) -> Result<Vec<MaintenanceRequestFile>, DomainError> {
        let query = format!(
            "SELECT {} FROM maintenance_request_files WHERE maintenance_request_id IS NULL ORDER BY id",
            FILE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find orphaned files", e))?;
        rows.iter().map(Self::row_to_file).collect()
    }
}
