//! One handler per subcommand. Handlers take any [`Store`] and return the
//! text to print.

use anyhow::{Context, Result};
use bootcfg_store::store::file::to_json_tabbed;
use bootcfg_store::{Profile, Store, TemplateKind};
use serde::Serialize;
use std::io::Read;

fn render<T: Serialize>(value: &T) -> Result<String> {
    let bytes = to_json_tabbed(value)?;
    Ok(String::from_utf8(bytes)?)
}

pub fn group_list(store: &dyn Store) -> Result<String> {
    let mut groups = store.group_list()?;
    groups.sort_by(|a, b| a.id.cmp(&b.id));
    render(&groups)
}

pub fn group_get(store: &dyn Store, id: &str) -> Result<String> {
    render(&store.group_get(id)?)
}

pub fn profile_list(store: &dyn Store) -> Result<String> {
    render(&store.profile_list()?)
}

pub fn profile_get(store: &dyn Store, id: &str) -> Result<String> {
    render(&store.profile_get(id)?)
}

pub fn profile_put(store: &dyn Store, mut input: impl Read) -> Result<String> {
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .context("failed to read profile")?;
    let profile: Profile = serde_json::from_str(&raw).context("invalid profile JSON")?;
    store.profile_put(&profile)?;
    Ok(format!("Stored profile {}", profile.id))
}

pub fn template_get(store: &dyn Store, kind: TemplateKind, name: &str) -> Result<String> {
    let text = match kind {
        TemplateKind::Ignition => store.ignition_get(name)?,
        TemplateKind::Cloud => store.cloud_get(name)?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootcfg_store::store::memory::fixtures::StoreFixture;
    use bootcfg_store::{Group, StoreError};

    #[test]
    fn test_group_list_sorted_json() {
        let fixture = StoreFixture::with_groups(vec![
            Group::new("zeta", "p"),
            Group::new("alpha", "p"),
        ]);
        let out = group_list(&fixture.store).unwrap();
        let groups: Vec<Group> = serde_json::from_str(&out).unwrap();
        let ids: Vec<_> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_group_get_unknown() {
        let fixture = StoreFixture::new();
        let err = group_get(&fixture.store, "nope").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::GroupNotFound(_))
        ));
    }

    #[test]
    fn test_profile_get_is_tab_indented() {
        let fixture = StoreFixture::new().with_profile("etcd", "/vmlinuz");
        let out = profile_get(&fixture.store, "etcd").unwrap();
        assert!(out.starts_with("{\n\t\"id\": \"etcd\""));
    }

    #[test]
    fn test_profile_put_from_reader() {
        let fixture = StoreFixture::new();
        let input = r#"{"id": "worker", "boot": {"kernel": "/k"}}"#.as_bytes();
        let out = profile_put(&fixture.store, input).unwrap();
        assert_eq!(out, "Stored profile worker");
        assert_eq!(fixture.store.profile_get("worker").unwrap().boot.kernel, "/k");
    }

    #[test]
    fn test_profile_put_rejects_invalid_json() {
        let fixture = StoreFixture::new();
        let err = profile_put(&fixture.store, "{".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid profile JSON"));
    }

    #[test]
    fn test_profile_put_rejects_invalid_profile() {
        let fixture = StoreFixture::new();
        let err = profile_put(&fixture.store, r#"{"id": ""}"#.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_profile_list() {
        let fixture = StoreFixture::new()
            .with_profile("a", "/a")
            .with_profile("b", "/b");
        let profiles: Vec<Profile> =
            serde_json::from_str(&profile_list(&fixture.store).unwrap()).unwrap();
        assert_eq!(profiles.len(), 2);
    }

    #[test]
    fn test_template_get_dispatches_by_kind() {
        let fixture = StoreFixture::new()
            .with_ignition("x", "ign")
            .with_cloud("x", "cloud");
        assert_eq!(
            template_get(&fixture.store, TemplateKind::Ignition, "x").unwrap(),
            "ign"
        );
        assert_eq!(
            template_get(&fixture.store, TemplateKind::Cloud, "x").unwrap(),
            "cloud"
        );
    }
}
