pub mod policy;

pub use policy::FormPolicy;

/// Loads `.env` from the working directory (or a parent) into the process
/// environment. Returns whether a file was loaded.
///
/// Call this before anything reads the environment, the logger included.
pub fn load_dotenv() -> bool {
    match dotenv::dotenv() {
        Ok(path) => {
            log::debug!("loaded environment from {}", path.display());
            true
        }
        Err(e) => {
            log::debug!("no .env file loaded, using process environment only: {}", e);
            false
        }
    }
}
