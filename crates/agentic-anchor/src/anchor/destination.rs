//! External name references an anchor attests to.
//!
//! Wire form: `[typeTag:1][canonical:string]`. The canonical bytes are
//! the UTF-8 form a name resolver would publish.

use serde::{Deserialize, Serialize};

use crate::codec::opaque::{decode_slice, encode_slice};
use crate::codec::{take_byte, CodecResult, Decode, Encode};
use crate::error::{CodecError, IdentityError, Result};

const DOMAIN_TAG: u8 = 1;
const DID_TAG: u8 = 2;
const URL_TAG: u8 = 3;

/// An externally resolved identity reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// A DNS name, stored lower-cased.
    Domain(String),
    /// A decentralized identifier, `did:<method>:<id>`.
    Did(String),
    /// An `https://` URL.
    Url(String),
}

impl Destination {
    pub fn domain(name: &str) -> Result<Self> {
        let name = name.trim_end_matches('.').to_ascii_lowercase();
        let valid = !name.is_empty()
            && name.len() <= 253
            && name.split('.').all(|label| {
                !label.is_empty()
                    && label.len() <= 63
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            });
        if !valid {
            return Err(IdentityError::InvalidDestination(format!(
                "not a domain name: {name}"
            )));
        }
        Ok(Self::Domain(name))
    }

    pub fn did(did: &str) -> Result<Self> {
        let mut parts = did.splitn(3, ':');
        let valid = parts.next() == Some("did")
            && parts.next().is_some_and(|m| !m.is_empty())
            && parts.next().is_some_and(|id| !id.is_empty());
        if !valid {
            return Err(IdentityError::InvalidDestination(format!(
                "not a DID: {did}"
            )));
        }
        Ok(Self::Did(did.to_string()))
    }

    pub fn url(url: &str) -> Result<Self> {
        match url.strip_prefix("https://") {
            Some(rest) if !rest.is_empty() => Ok(Self::Url(url.to_string())),
            _ => Err(IdentityError::InvalidDestination(format!(
                "not an https URL: {url}"
            ))),
        }
    }

    /// Build from a resolver-supplied type tag and canonical bytes.
    pub fn from_parts(tag: u8, canonical: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(canonical)
            .map_err(|_| IdentityError::InvalidDestination("canonical form is not UTF-8".into()))?;
        match tag {
            DOMAIN_TAG => Self::domain(text),
            DID_TAG => Self::did(text),
            URL_TAG => Self::url(text),
            other => Err(IdentityError::UnknownDestinationType(other)),
        }
    }

    pub fn type_tag(&self) -> u8 {
        match self {
            Self::Domain(_) => DOMAIN_TAG,
            Self::Did(_) => DID_TAG,
            Self::Url(_) => URL_TAG,
        }
    }

    pub fn canonical(&self) -> &str {
        match self {
            Self::Domain(s) | Self::Did(s) | Self::Url(s) => s,
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical())
    }
}

impl Encode for Destination {
    fn encode_to(&self, out: &mut Vec<u8>) -> CodecResult<()> {
        out.push(self.type_tag());
        encode_slice(self.canonical().as_bytes(), out)
    }
}

impl Decode for Destination {
    fn decode_continuing(input: &[u8]) -> CodecResult<(Self, &[u8])> {
        let (tag, rest) = take_byte(input)?;
        let (body, rest) = decode_slice(rest)?;
        let value = match Self::from_parts(tag, body) {
            Ok(value) => value,
            Err(IdentityError::InvalidDestination(_)) if std::str::from_utf8(body).is_err() => {
                return Err(CodecError::InvalidUtf8)
            }
            Err(_) => {
                return Err(CodecError::InvalidPrefix {
                    type_name: "destination",
                    prefix: tag,
                })
            }
        };
        // Only the canonical spelling is accepted on the wire.
        if value.canonical().as_bytes() != body {
            return Err(CodecError::InvalidPrefix {
                type_name: "destination",
                prefix: tag,
            });
        }
        Ok((value, rest))
    }
}
