//! User administration endpoints.

use reqwest::{RequestBuilder, Response};

use lostfound_shared::account::handle::RegisterDescriptor;
use lostfound_shared::account::UserRecord;

use crate::Error;

/// `GET /users/all` (admin).
pub struct FetchUsers;

#[async_trait::async_trait]
impl super::ApiRequest for FetchUsers {
    type Output = Vec<UserRecord>;

    fn path(&self) -> String {
        "/users/all".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json_body(response).await
    }
}

/// `DELETE /users/delete/{id}` (admin).
pub struct DeleteUser {
    pub id: u64,
}

#[async_trait::async_trait]
impl super::ApiRequest for DeleteUser {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::DELETE;

    fn path(&self) -> String {
        format!("/users/delete/{}", self.id)
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// `POST /users/save`: self-registration; no auth required.
pub struct RegisterUser {
    pub descriptor: RegisterDescriptor,
}

#[async_trait::async_trait]
impl super::ApiRequest for RegisterUser {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> String {
        "/users/save".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(&self.descriptor))
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}
