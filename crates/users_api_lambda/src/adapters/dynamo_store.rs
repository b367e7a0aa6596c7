use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use users_api_core::{Deleted, StoreError, User, UserId, UserInput, UserStore};

pub const KEY_ATTRIBUTE: &str = "userId";
const NAME_ATTRIBUTE: &str = "name";
const EMAIL_ATTRIBUTE: &str = "email";
const EXISTS_CONDITION: &str = "attribute_exists(userId)";

pub type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed user table keyed by `userId`.
///
/// One request per operation, no client-side retries beyond the SDK defaults
/// and no caching. Calls block the current worker thread, so this must run
/// inside a multi-threaded tokio runtime.
#[derive(Debug, Clone)]
pub struct DynamoUserStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoUserStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(id: &UserId) -> (String, AttributeValue) {
        (KEY_ATTRIBUTE.to_string(), AttributeValue::S(id.to_string()))
    }
}

impl UserStore for DynamoUserStore {
    fn create(&self, input: UserInput) -> Result<User, StoreError> {
        let user = input.into_user(UserId::new(uuid::Uuid::new_v4().to_string()));
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let item = item_from_user(&user);

        block_on(async move {
            client
                .put_item()
                .table_name(table_name)
                .set_item(Some(item))
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    StoreError::unavailable(format!(
                        "failed to put user item: {}",
                        DisplayErrorContext(&error)
                    ))
                })
        })?;

        Ok(user)
    }

    fn get_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let (key_name, key_value) = Self::key(id);

        let output = block_on(async move {
            client
                .get_item()
                .table_name(table_name)
                .key(key_name, key_value)
                .send()
                .await
                .map_err(|error| {
                    StoreError::unavailable(format!(
                        "failed to get user item: {}",
                        DisplayErrorContext(&error)
                    ))
                })
        })?;

        output.item().map(user_from_item).transpose()
    }

    fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();

        let items = block_on(async move {
            let mut items = Vec::new();
            let mut start_key: Option<Item> = None;
            loop {
                let page = client
                    .scan()
                    .table_name(table_name.clone())
                    .set_exclusive_start_key(start_key.take())
                    .send()
                    .await
                    .map_err(|error| {
                        StoreError::unavailable(format!(
                            "failed to scan user table: {}",
                            DisplayErrorContext(&error)
                        ))
                    })?;
                items.extend(page.items().iter().cloned());
                match page.last_evaluated_key() {
                    Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                    _ => break,
                }
            }
            Ok::<_, StoreError>(items)
        })?;

        items.iter().map(user_from_item).collect()
    }

    fn update(&self, id: &UserId, input: UserInput) -> Result<Option<User>, StoreError> {
        let (key_name, key_value) = Self::key(id);

        let mut request = self
            .client
            .update_item()
            .table_name(self.table_name.clone())
            .key(key_name, key_value)
            .condition_expression(EXISTS_CONDITION)
            .expression_attribute_names("#n", NAME_ATTRIBUTE)
            .expression_attribute_values(":n", AttributeValue::S(input.name))
            .return_values(ReturnValue::AllNew);
        request = match input.email {
            Some(email) => request
                .update_expression("SET #n = :n, email = :e")
                .expression_attribute_values(":e", AttributeValue::S(email)),
            None => request.update_expression("SET #n = :n REMOVE email"),
        };

        let output = block_on(async move { request.send().await });
        match output {
            Ok(output) => output.attributes().map(user_from_item).transpose(),
            Err(error) => match classify_write_failure(
                error.as_service_error(),
                "update",
                DisplayErrorContext(&error),
            ) {
                WriteFailure::MissingItem => Ok(None),
                WriteFailure::Store(error) => Err(error),
            },
        }
    }

    fn delete_by_id(&self, id: &UserId) -> Result<Deleted, StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let (key_name, key_value) = Self::key(id);

        let output = block_on(async move {
            client
                .delete_item()
                .table_name(table_name)
                .key(key_name, key_value)
                .condition_expression(EXISTS_CONDITION)
                .send()
                .await
        });
        match output {
            Ok(_) => Ok(Deleted::Removed),
            Err(error) => match classify_write_failure(
                error.as_service_error(),
                "delete",
                DisplayErrorContext(&error),
            ) {
                WriteFailure::MissingItem => Ok(Deleted::NotFound),
                WriteFailure::Store(error) => Err(error),
            },
        }
    }
}

/// Service errors of the conditional writes guarded by `attribute_exists`.
pub trait ConditionalCheck {
    fn is_condition_failure(&self) -> bool;
}

impl ConditionalCheck for UpdateItemError {
    fn is_condition_failure(&self) -> bool {
        self.is_conditional_check_failed_exception()
    }
}

impl ConditionalCheck for DeleteItemError {
    fn is_condition_failure(&self) -> bool {
        self.is_conditional_check_failed_exception()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum WriteFailure {
    /// The `attribute_exists` condition failed: no item under that key.
    MissingItem,
    Store(StoreError),
}

/// `service_error` is `None` for transport, timeout and dispatch failures.
pub fn classify_write_failure<E: ConditionalCheck>(
    service_error: Option<&E>,
    action: &str,
    detail: impl Display,
) -> WriteFailure {
    if service_error.is_some_and(|error| error.is_condition_failure()) {
        WriteFailure::MissingItem
    } else {
        WriteFailure::Store(StoreError::unavailable(format!(
            "failed to {action} user item: {detail}"
        )))
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

pub fn item_from_user(user: &User) -> Item {
    let mut item = HashMap::from([
        (
            KEY_ATTRIBUTE.to_string(),
            AttributeValue::S(user.id.to_string()),
        ),
        (
            NAME_ATTRIBUTE.to_string(),
            AttributeValue::S(user.name.clone()),
        ),
    ]);
    if let Some(email) = &user.email {
        item.insert(EMAIL_ATTRIBUTE.to_string(), AttributeValue::S(email.clone()));
    }
    item
}

pub fn user_from_item(item: &Item) -> Result<User, StoreError> {
    let id = required_string(item, KEY_ATTRIBUTE)?;
    let name = required_string(item, NAME_ATTRIBUTE)?;
    let email = match item.get(EMAIL_ATTRIBUTE) {
        None | Some(AttributeValue::Null(_)) => None,
        Some(value) => Some(
            value
                .as_s()
                .map_err(|_| {
                    StoreError::corrupt(format!(
                        "attribute '{EMAIL_ATTRIBUTE}' of user {id} is not a string"
                    ))
                })?
                .clone(),
        ),
    };

    Ok(User {
        id: UserId::new(id),
        name,
        email,
    })
}

fn required_string(item: &Item, attribute: &str) -> Result<String, StoreError> {
    item.get(attribute)
        .ok_or_else(|| StoreError::corrupt(format!("attribute '{attribute}' is missing")))?
        .as_s()
        .cloned()
        .map_err(|_| StoreError::corrupt(format!("attribute '{attribute}' is not a string")))
}
