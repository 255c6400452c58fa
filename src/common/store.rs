use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::common::config::Config;
use crate::common::encoding::Item;
use crate::common::errors::StoreError;
use crate::common::{Task, FINISHED_ATTRIBUTE, KEY_ATTRIBUTE};

/// The four table operations the handlers need.
pub trait TaskStore {
    /// Every row in the table.
    fn scan(&self) -> impl Future<Output = Result<Vec<Item>, StoreError>> + Send;

    fn put(&self, task: Task) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Sets `Finished` on an existing row and returns the updated attributes,
    /// or `None` when no row has `task_id`.
    fn set_finished(
        &self,
        task_id: &str,
        finished: bool,
    ) -> impl Future<Output = Result<Option<Item>, StoreError>> + Send;

    /// Removing an absent row succeeds.
    fn delete(&self, task_id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

static SHARED_TABLE: OnceCell<DynamoTaskStore> = OnceCell::const_new();

/// Process-wide table handle, built on first use and reused by every
/// invocation that lands on the same execution environment.
pub async fn shared_table() -> &'static DynamoTaskStore {
    SHARED_TABLE
        .get_or_init(|| async {
            let config = Config::from_env();
            let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
            let store =
                DynamoTaskStore::new(aws_sdk_dynamodb::Client::new(&aws_config), config.table_name);
            info!("Initialized table client for {}", store.table_name());
            store
        })
        .await
}

#[derive(Debug, Clone)]
pub struct DynamoTaskStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoTaskStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    error!("{} on table failed: {}", operation, message);
    StoreError::backend(operation, message)
}

impl TaskStore for DynamoTaskStore {
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        self.client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(|err| sdk_error("Scan", err))
    }

    async fn put(&self, task: Task) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(task.into()))
            .send()
            .await
            .map_err(|err| sdk_error("PutItem", err))?;

        Ok(())
    }

    async fn set_finished(&self, task_id: &str, finished: bool) -> Result<Option<Item>, StoreError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(task_id.to_string()))
            .update_expression(format!("SET {FINISHED_ATTRIBUTE} = :fin"))
            .condition_expression(format!("attribute_exists({KEY_ATTRIBUTE})"))
            .expression_attribute_values(":fin", AttributeValue::Bool(finished))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await;

        match result {
            Ok(output) => Ok(Some(output.attributes.unwrap_or_default())),
            Err(SdkError::ServiceError(val)) => match val.err() {
                UpdateItemError::ConditionalCheckFailedException(_) => {
                    info!("No task with id {}", task_id);
                    Ok(None)
                }
                _ => Err(sdk_error("UpdateItem", SdkError::ServiceError(val))),
            },
            Err(err) => Err(sdk_error("UpdateItem", err)),
        }
    }

    async fn delete(&self, task_id: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(task_id.to_string()))
            .send()
            .await
            .map_err(|err| sdk_error("DeleteItem", err))?;

        Ok(())
    }
}

/// Table kept in process memory, with the same semantics as
/// [`DynamoTaskStore`]. Rows come back from `scan` ordered by key.
/// Used as the backing table in tests.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    rows: Mutex<BTreeMap<String, Item>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TaskStore for MemoryTaskStore {
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        let rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.values().cloned().collect())
    }

    async fn put(&self, task: Task) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        rows.insert(task.task_id.clone(), task.into());
        Ok(())
    }

    async fn set_finished(&self, task_id: &str, finished: bool) -> Result<Option<Item>, StoreError> {
        let mut rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        let Some(row) = rows.get_mut(task_id) else {
            return Ok(None);
        };

        row.insert(FINISHED_ATTRIBUTE.to_string(), AttributeValue::Bool(finished));

        let mut updated = Item::new();
        updated.insert(FINISHED_ATTRIBUTE.to_string(), AttributeValue::Bool(finished));
        Ok(Some(updated))
    }

    async fn delete(&self, task_id: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().map_err(|_| StoreError::Poisoned)?;
        rows.remove(task_id);
        Ok(())
    }
}
