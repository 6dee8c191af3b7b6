//! Session lifecycle commands.
//!
//! # Usage
//!
//! ```bash
//! medipos register -c "Asha Pharmacy" -e owner@example.com -p secret1
//! medipos login -e owner@example.com -p secret1 --remember
//! medipos logout
//! ```

use medipos_client::AppError;
use medipos_client::auth::{self, AuthError, Credentials, Registration};

use super::Context;

/// Exchange credentials for a bearer token and store it.
///
/// Without `--email` the address remembered by a previous
/// `login --remember` is used.
pub async fn login(email: Option<String>, password: &str, remember: bool) -> Result<(), AppError> {
    let ctx = Context::from_env()?;

    let email = match email {
        Some(email) => email,
        None => ctx
            .store
            .remembered_email()?
            .ok_or(AuthError::MissingFields)?,
    };

    let credential = auth::login(
        &ctx.api,
        &ctx.store,
        &Credentials {
            email,
            password: password.to_owned(),
            remember,
        },
    )
    .await?;

    match credential.user {
        Some(user) => println!("Logged in to {} ({})", user.company, user.email),
        None => println!("Logged in"),
    }
    Ok(())
}

/// Create a tenant/company account.
///
/// `--confirm` defaults to the password itself; passing it separately
/// exercises the same mismatch check the registration form has.
pub async fn register(
    company: &str,
    email: &str,
    password: &str,
    confirm: Option<&str>,
) -> Result<(), AppError> {
    let ctx = Context::from_env()?;

    let profile = auth::register(
        &ctx.api,
        &ctx.store,
        &Registration {
            company: company.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            confirm: confirm.unwrap_or(password).to_owned(),
        },
    )
    .await?;

    println!("Registered {}. Run `medipos login` to start.", profile.company);
    Ok(())
}

/// Drop the stored session token.
pub fn logout() -> Result<(), AppError> {
    let ctx = Context::from_env()?;
    auth::logout(&ctx.store)?;

    println!("Logged out");
    Ok(())
}
