//! Authentication endpoints. None of these carry a bearer token requirement;
//! the gateway simply attaches whatever session exists.

use reqwest::{RequestBuilder, Response};

use lostfound_shared::account::handle::{
    CredentialsDescriptor, OtpDescriptor, ResetRequestDescriptor, SessionGrant,
};

use crate::Error;

/// `POST /auth/verify-credentials`: first login step; triggers the OTP
/// email on success.
pub struct VerifyCredentials {
    pub email: String,
    pub password: String,
}

#[async_trait::async_trait]
impl super::ApiRequest for VerifyCredentials {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> String {
        "/auth/verify-credentials".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(&CredentialsDescriptor {
            email: self.email.clone(),
            password: self.password.clone(),
        }))
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// `POST /auth/confirm-otp`: second login step; grants the session.
pub struct ConfirmOtp {
    pub email: String,
    pub otp: String,
}

#[async_trait::async_trait]
impl super::ApiRequest for ConfirmOtp {
    type Output = SessionGrant;
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> String {
        "/auth/confirm-otp".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(&OtpDescriptor {
            email: self.email.clone(),
            otp: self.otp.clone(),
        }))
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        super::json_body(response).await
    }
}

/// `POST /auth/request-reset`: emails a reset token.
pub struct RequestReset {
    pub email: String,
}

#[async_trait::async_trait]
impl super::ApiRequest for RequestReset {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> String {
        "/auth/request-reset".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.json(&ResetRequestDescriptor {
            email: self.email.clone(),
        }))
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

/// `POST /auth/reset-password?token=&newPassword=`: token and password go
/// as query parameters, no body.
pub struct ResetPassword {
    pub token: String,
    pub new_password: String,
}

#[async_trait::async_trait]
impl super::ApiRequest for ResetPassword {
    type Output = ();
    const METHOD: reqwest::Method = reqwest::Method::POST;

    fn path(&self) -> String {
        "/auth/reset-password".to_owned()
    }

    fn make_req(&self, req: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(req.query(&[
            ("token", self.token.as_str()),
            ("newPassword", self.new_password.as_str()),
        ]))
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}
