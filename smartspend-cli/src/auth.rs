use anyhow::{Context, Result, bail};
use dialoguer::Password;
use serde::{Deserialize, Serialize};
use smartspend_finance::Provider;
use std::fs;
use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};

use crate::state::state_file;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuthState {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl AuthState {
    pub fn key_for(&self, provider: Provider) -> Option<String> {
        match provider {
            Provider::Gemini => self.gemini_api_key.clone(),
            Provider::OpenAI => self.openai_api_key.clone(),
            Provider::Anthropic => self.anthropic_api_key.clone(),
        }
    }

    pub fn set_key(&mut self, provider: Provider, key: String) {
        let slot = match provider {
            Provider::Gemini => &mut self.gemini_api_key,
            Provider::OpenAI => &mut self.openai_api_key,
            Provider::Anthropic => &mut self.anthropic_api_key,
        };
        *slot = Some(key);
    }
}

fn auth_path() -> Result<PathBuf> {
    state_file("auth.json")
}

pub fn load_auth() -> Result<AuthState> {
    load_auth_from(&auth_path()?)
}

fn load_auth_from(p: &Path) -> Result<AuthState> {
    if !p.exists() {
        return Ok(AuthState::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}

fn save_auth_to(auth: &AuthState, p: &Path) -> Result<()> {
    let s = serde_json::to_string_pretty(auth)?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Read a secret without echo when attached to a terminal. Piped input
/// (scripts, CI) is read as a single line.
pub fn prompt_secret(label: &str) -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .context("read secret from terminal");
    }
    read_secret_line(stdin.lock())
}

/// Passphrases may contain spaces; only the line ending is stripped.
fn read_secret_line<R: BufRead>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).context("read secret from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn paste_api_key(provider: Provider) -> Result<()> {
    let p = auth_path()?;
    let mut auth = load_auth_from(&p)?;
    let key = prompt_secret(&format!("Paste {provider} API key"))?.trim().to_string();
    if key.is_empty() {
        bail!("no key entered");
    }
    auth.set_key(provider, key);
    save_auth_to(&auth, &p)?;
    println!("Saved {provider} API key to {}", p.display());
    Ok(())
}
