//! Hash a password for seeding user rows.

use clap::Args;

use hirevault_auth::PasswordHasher;
use hirevault_core::error::AppError;

/// Arguments for the hash-password command
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Password to hash; prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,
}

/// Print the Argon2id hash of the given or prompted password
pub fn execute(args: &HashPasswordArgs) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }

    let hash = PasswordHasher::new().hash_password(&password)?;
    println!("{hash}");
    Ok(())
}
