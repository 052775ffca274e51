use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CreateFilmDto, GetFilmDto, GetFilmsDto};
use kernel::prelude::entity::{SelectLimit, SelectOffset};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    external_id: String,
    title: String,
    /// Seconds.
    duration: i64,
    price: i64,
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
    #[serde(default)]
    limit: SelectLimit,
    #[serde(default)]
    offset: SelectOffset,
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
    type To = CreateFilmDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateFilmDto {
            external_id: input.external_id,
            title: input.title,
            duration: input.duration,
            price: input.price,
        }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetFilmsDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetFilmsDto {
            limit: input.limit.into(),
            offset: input.offset.into(),
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetFilmDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetFilmDto { id: input.id }
    }
}
