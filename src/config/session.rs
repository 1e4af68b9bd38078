use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::GatorResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<String>,
    #[serde(default)]
    pub current_user_name: Option<String>,
}

/// The JSON file remembering who is logged in between invocations.
#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
    data: SessionData,
}

impl Session {
    /// Read the session at `path`; a missing file is an empty session.
    pub fn load<P: AsRef<Path>>(path: P) -> GatorResult<Self> {
        let path = path.as_ref().to_path_buf();

        let data = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => SessionData::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, data })
    }

    pub fn db_path(&self) -> Option<&str> {
        self.data.db_path.as_deref()
    }

    pub fn current_user_name(&self) -> Option<&str> {
        self.data.current_user_name.as_deref()
    }

    /// Record `name` as the current user and persist the file
    pub fn set_user(&mut self, name: &str) -> GatorResult<()> {
        self.data.current_user_name = Some(name.to_string());
        self.save()
    }

    fn save(&self) -> GatorResult<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
