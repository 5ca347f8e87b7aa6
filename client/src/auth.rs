//! The OTP-gated login flow and its session bookkeeping.

use crate::api::{self, auth as requests, users};
use crate::notify::Notice;
use crate::{Context, Error, Session};

use lostfound_shared::account::handle::RegisterDescriptor;

/// First login step: verify credentials and trigger the OTP email. No
/// session is granted until [`confirm_otp`] succeeds.
pub async fn request_otp(cx: &Context, email: &str, password: &str) -> Result<(), Error> {
    api::call(
        cx,
        requests::VerifyCredentials {
            email: email.to_owned(),
            password: password.to_owned(),
        },
    )
    .await?;
    cx.notifier()
        .notify(Notice::info("OTP sent to your email. Please enter the OTP."));
    Ok(())
}

/// Second login step: confirm the OTP, store the granted session, and return
/// it.
pub async fn confirm_otp(cx: &Context, email: &str, otp: &str) -> Result<Session, Error> {
    let grant = api::call(
        cx,
        requests::ConfirmOtp {
            email: email.to_owned(),
            otp: otp.to_owned(),
        },
    )
    .await?;

    let session = Session {
        token: grant.token,
        name: grant.name,
        email: grant.email,
        role: grant.role,
    };
    cx.session().set(session.clone());
    cx.notifier().notify(Notice::success(format!(
        "Sign in successful! Welcome {}",
        session.name
    )));
    Ok(session)
}

/// Self-registration. The new account still signs in through the OTP flow.
pub async fn register(cx: &Context, descriptor: RegisterDescriptor) -> Result<(), Error> {
    api::call(cx, users::RegisterUser { descriptor }).await?;
    cx.notifier()
        .notify(Notice::success("Sign up successful! Please sign in."));
    Ok(())
}

pub async fn request_reset(cx: &Context, email: &str) -> Result<(), Error> {
    api::call(
        cx,
        requests::RequestReset {
            email: email.to_owned(),
        },
    )
    .await?;
    cx.notifier().notify(Notice::success(
        "Password reset email sent. Check your inbox for the reset token.",
    ));
    Ok(())
}

pub async fn reset_password(cx: &Context, token: &str, new_password: &str) -> Result<(), Error> {
    api::call(
        cx,
        requests::ResetPassword {
            token: token.to_owned(),
            new_password: new_password.to_owned(),
        },
    )
    .await?;
    cx.notifier().notify(Notice::success(
        "Password reset successful! Please sign in with your new password.",
    ));
    Ok(())
}

/// Clears the stored session. Purely local; the backend keeps no session
/// state beyond the token itself.
pub fn logout(cx: &Context) {
    cx.session().clear();
}
