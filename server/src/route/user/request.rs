use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CreateUserDto, GetUserDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    name: String,
    credits: i64,
    #[serde(default)]
    is_admin: bool,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateUserDto;
    fn emit(
        &self,
        CreateRequest {
            name,
            credits,
            is_admin,
        }: CreateRequest,
    ) -> Self::To {
        CreateUserDto {
            name,
            credits,
            is_admin,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetUserDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}
