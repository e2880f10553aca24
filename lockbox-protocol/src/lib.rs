//! Command envelope codec for the Lockbox secrets SDK.
//!
//! Every adapter talks to the engine through a canonical JSON command
//! document: a single populated top-level key naming the operation, with
//! unset optional fields omitted entirely (never emitted as null). The
//! engine answers with a `{ success, data, errorMessage }` envelope.
//!
//! This crate owns those wire shapes and the pure encode/decode functions
//! over them. It performs no I/O and holds no state.

mod codec;
mod command;
mod error;
mod response;

pub use codec::{decode_command, decode_response, encode_command, encode_response};
pub use command::{
    AccessTokenLoginRequest, ApiKeyLoginRequest, CancellationTestRequest, Command,
    ErrorTestRequest, FingerprintRequest, PasswordLoginRequest, ProjectCreateRequest,
    ProjectGetRequest, ProjectPutRequest, ProjectsCommand, ProjectsDeleteRequest,
    ProjectsListRequest, SecretCreateRequest, SecretGetRequest, SecretIdentifiersRequest,
    SecretPutRequest, SecretsCommand, SecretsDeleteRequest, SecretsGetRequest, SyncRequest,
    UserApiKeyRequest,
};
pub use error::{CodecError, CodecResult};
pub use response::{
    FingerprintResponse, LoginResponse, ProjectDeleteResponse, ProjectsDeleteResponse,
    ProjectsResponse, Response, SecretDeleteResponse, SecretIdentifierResponse,
    SecretIdentifiersResponse, SecretsDeleteResponse, SecretsResponse, SecretsSyncResponse,
    UserApiKeyResponse,
};
