//! Admin panel setup commands.

use std::io::{BufRead as _, Write as _};

use atelier_admin::services::auth;

/// Read a password from stdin and print its Argon2 PHC hash.
///
/// The output is the exact value to put in `ADMIN_PASSWORD_HASH`.
///
/// # Errors
///
/// Returns an error when stdin cannot be read or hashing fails.
#[allow(clippy::print_stdout)]
pub fn hash_password() -> Result<(), Box<dyn std::error::Error>> {
    print!("Password: ");
    std::io::stdout().flush()?;

    let mut password = String::new();
    std::io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);

    if password.is_empty() {
        return Err("password must not be empty".into());
    }

    let hash = auth::hash_password(password)?;
    println!("{hash}");
    Ok(())
}
