//! Claim endpoints.

use reqwest::{RequestBuilder, Response};

use lostfound_shared::claim::handle::ClaimCreateDescriptor;
use lostfound_shared::claim::{ClaimRecord, ClaimStatus};

use crate::Error;

/// `GET /claimRequests/all`: the full claim list (admin surface).
pub struct FetchClaims;

#[async_trait::async_trait]
impl super::ApiRequest for FetchClaims {
    type Output = Vec<ClaimRecord>;

    fn path(&self) -> String {
        "/claimRequests/all".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json_body(response).await
    }
}

/// `GET /claimRequests/my-claims`: the caller's own claims.
pub struct FetchMyClaims;

#[async_trait::async_trait]
impl super::ApiRequest for FetchMyClaims {
    type Output = Vec<ClaimRecord>;

    fn path(&self) -> String {
        "/claimRequests/my-claims".to_owned()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json_body(response).await
    }
}

/// Exactly one item backs a claim. Encoding the target as an enum makes the
/// "neither id bound" call unrepresentable instead of a runtime surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimTarget {
    Lost(u64),
    Found(u64),
}

impl ClaimTarget {
    fn query(self) -> (&'static str, u64) {
        match self {
            ClaimTarget::Lost(id) => ("lostItemId", id),
            ClaimTarget::Found(id) => ("foundItemId", id),
        }
    }
}

/// `POST /claimRequests/create?lostItemId=|foundItemId=`.
pub struct CreateClaim {
    pub target: ClaimTarget,
    pub descriptor: ClaimCreateDescriptor,
}

#[async_trait::async_trait]
impl super::ApiRequest for CreateClaim {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> String {
        "/claimRequests/create".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        let (key, id) = self.target.query();
        Ok(req.query(&[(key, id)]).json(&self.descriptor))
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// `PUT /claimRequests/ClaimVerification/{id}/status?status=`: admin
/// verdict. The response body is treated as non-authoritative; callers
/// resync with a full fetch shortly after.
pub struct UpdateClaimStatus {
    pub id: u64,
    pub status: ClaimStatus,
}

#[async_trait::async_trait]
impl super::ApiRequest for UpdateClaimStatus {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::PUT;

    fn path(&self) -> String {
        format!("/claimRequests/ClaimVerification/{}/status", self.id)
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.query(&[("status", self.status.as_str())]))
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// `PUT /claimRequests/rollback/{id}`: admin reset to PENDING. No body.
pub struct RollbackClaim {
    pub id: u64,
}

#[async_trait::async_trait]
impl super::ApiRequest for RollbackClaim {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::PUT;

    fn path(&self) -> String {
        format!("/claimRequests/rollback/{}", self.id)
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// `DELETE /claimRequests/delete/{id}`.
pub struct DeleteClaim {
    pub id: u64,
}

#[async_trait::async_trait]
impl super::ApiRequest for DeleteClaim {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::DELETE;

    fn path(&self) -> String {
        format!("/claimRequests/delete/{}", self.id)
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}
