//! The five contact tools.

use crate::error::{AppError, ValidationError};
use crate::model::Contact;
use crate::service::{ContactFields, ContactService, ListRequest, RequestValidator};
use crate::tools::{decode, schema_of, ToolDescriptor, ToolError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const CONTACT_CREATE: &str = "contact_create";
pub const CONTACT_GET_ALL: &str = "contact_get_all";
pub const CONTACT_GET_BY_ID: &str = "contact_get_by_id";
pub const CONTACT_UPDATE: &str = "contact_update";
pub const CONTACT_DELETE: &str = "contact_delete";

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateContactInput {
    pub name: String,
    #[schema(format = "email")]
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetContactsInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    /// `field:asc|desc`
    pub sort_by: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactIdInput {
    pub contact_id: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateContactInput {
    pub contact_id: i64,
    pub name: Option<String>,
    #[schema(format = "email")]
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactList {
    #[schema(inline)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResult {
    pub success: bool,
}

/// Tool entry point. Shares `ContactService` with the HTTP handlers.
#[derive(Clone)]
pub struct ContactTools {
    contacts: ContactService,
}

impl ContactTools {
    pub fn new(contacts: ContactService) -> Self {
        ContactTools { contacts }
    }

    pub fn descriptors() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor {
                id: CONTACT_CREATE,
                name: "Create Contact",
                description: "Create a new contact form submission",
                input_schema: schema_of::<CreateContactInput>(),
                output_schema: schema_of::<Contact>(),
            },
            ToolDescriptor {
                id: CONTACT_GET_ALL,
                name: "Get All Contacts",
                description: "Get all contact form submissions with optional filters and pagination",
                input_schema: schema_of::<GetContactsInput>(),
                output_schema: schema_of::<ContactList>(),
            },
            ToolDescriptor {
                id: CONTACT_GET_BY_ID,
                name: "Get Contact By ID",
                description: "Get a single contact form submission by its ID",
                input_schema: schema_of::<ContactIdInput>(),
                output_schema: schema_of::<Contact>(),
            },
            ToolDescriptor {
                id: CONTACT_UPDATE,
                name: "Update Contact",
                description: "Update contact form submission information by ID",
                input_schema: schema_of::<UpdateContactInput>(),
                output_schema: schema_of::<Contact>(),
            },
            ToolDescriptor {
                id: CONTACT_DELETE,
                name: "Delete Contact",
                description: "Delete a contact form submission by its ID",
                input_schema: schema_of::<ContactIdInput>(),
                output_schema: schema_of::<DeleteResult>(),
            },
        ]
    }

    /// Dispatch by tool id with a JSON input; returns the JSON output.
    pub async fn call(&self, tool_id: &str, input: Value) -> Result<Value, ToolError> {
        tracing::debug!(tool = tool_id, "tool call");
        let output = match tool_id {
            CONTACT_CREATE => to_json(self.create(decode(input)?).await?),
            CONTACT_GET_ALL => to_json(self.get_all(decode(input)?).await?),
            CONTACT_GET_BY_ID => to_json(self.get_by_id(decode(input)?).await?),
            CONTACT_UPDATE => to_json(self.update(decode(input)?).await?),
            CONTACT_DELETE => to_json(self.delete(decode(input)?).await?),
            other => return Err(ToolError::unknown_tool(other)),
        };
        Ok(output)
    }

    pub async fn create(&self, input: CreateContactInput) -> Result<Contact, AppError> {
        let fields = ContactFields {
            name: Some(input.name),
            email: Some(input.email),
            subject: Some(input.subject),
            message: Some(input.message),
        };
        let new = RequestValidator::create(fields, input.user_id, ValidationError::default())?;
        self.contacts.create_contact(new).await
    }

    pub async fn get_all(&self, input: GetContactsInput) -> Result<ContactList, AppError> {
        let req = ListRequest {
            name: input.name,
            email: input.email,
            subject: input.subject,
            sort_by: input.sort_by,
            limit: input.limit,
            page: input.page,
        };
        let (filter, options) = RequestValidator::list(req, ValidationError::default())?;
        let contacts = self.contacts.query_contacts(&filter, &options).await?;
        Ok(ContactList { contacts })
    }

    pub async fn get_by_id(&self, input: ContactIdInput) -> Result<Contact, AppError> {
        let id = RequestValidator::contact_id(input.contact_id)?;
        self.contacts.require_contact(id).await
    }

    pub async fn update(&self, input: UpdateContactInput) -> Result<Contact, AppError> {
        let id = RequestValidator::contact_id(input.contact_id)?;
        let fields = ContactFields {
            name: input.name,
            email: input.email,
            subject: input.subject,
            message: input.message,
        };
        let changes = RequestValidator::update(fields, ValidationError::default())?;
        self.contacts.update_contact_by_id(id, &changes).await
    }

    pub async fn delete(&self, input: ContactIdInput) -> Result<DeleteResult, AppError> {
        let id = RequestValidator::contact_id(input.contact_id)?;
        self.contacts.delete_contact_by_id(id).await?;
        Ok(DeleteResult { success: true })
    }
}

fn to_json<T: Serialize>(v: T) -> Value {
    serde_json::to_value(v).unwrap_or(Value::Null)
}
