//! MusicKit developer token generator.
//!
//! Apple Music API requests are authenticated with a developer token: an
//! ES256-signed JWT whose header names the MusicKit key (`kid`) and whose
//! claims name the team (`iss`) and the validity window (`iat`, `exp`).
//!
//! ```no_run
//! use applemusic_token::Generator;
//!
//! let generator = Generator {
//!     key_id: "ABC123DEFG".into(),
//!     team_id: "DEF123GHIJ".into(),
//!     ttl: 3600,
//!     secret: std::fs::read("AuthKey_ABC123DEFG.p8").unwrap(),
//! };
//! let token = generator.generate().unwrap();
//! println!("Authorization: Bearer {token}");
//! ```

pub mod error;
mod jwt;
mod key;

pub use error::{KeyFormatError, Result, TokenError};
pub use jwt::{Claims, Generator, MAX_TTL_SECS, sign};
pub use key::{parse_pkcs8_pem, pem_from_body};
