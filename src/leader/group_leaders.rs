use crate::leader::error::LeaderError;
use crate::leader::error::LeaderError::{CantReadGroupLeadersFile, MalformedGroupLeadersFile};
use crate::tools::log_message_and_return;
use dto::group_leader::GroupLeader;
use log::info;
use std::fs;
use std::ops::Deref;
use std::path::Path;

/// The static lookup table of group leaders, loaded once at start-up.
#[derive(Debug, Default)]
pub struct GroupLeaders {
    leaders: Vec<GroupLeader>,
}

impl Deref for GroupLeaders {
    type Target = Vec<GroupLeader>;

    fn deref(&self) -> &Self::Target {
        &self.leaders
    }
}

impl From<Vec<GroupLeader>> for GroupLeaders {
    fn from(leaders: Vec<GroupLeader>) -> Self {
        GroupLeaders { leaders }
    }
}

impl GroupLeaders {
    /// Load the lookup table from a JSON file, such as:
    /// `[{"name": "Kim", "id": ["org-1", "org-2"]}, {"name": "Lee", "id": "org-3"}]`
    pub fn load(path: &Path) -> Result<Self, LeaderError> {
        let displayed_path = path.display().to_string();
        let content = fs::read_to_string(path).map_err(log_message_and_return(
            "Can't read group leaders file",
            CantReadGroupLeadersFile(displayed_path.clone()),
        ))?;
        let leaders: Vec<GroupLeader> =
            serde_json::from_str(&content).map_err(log_message_and_return(
                "Can't parse group leaders file",
                MalformedGroupLeadersFile(displayed_path.clone()),
            ))?;
        info!(
            "Group leaders loaded [path: {displayed_path}, count: {}]",
            leaders.len()
        );

        Ok(GroupLeaders { leaders })
    }

    /// Exact match on the name. The first matching entry wins.
    pub fn find(&self, name: &str) -> Option<&GroupLeader> {
        self.leaders.iter().find(|leader| leader.name() == name)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::tools::test::tests::write_temp_file;
    use dto::group_leader::GroupIds;

    pub fn get_group_leaders() -> GroupLeaders {
        GroupLeaders::from(vec![
            GroupLeader::new(
                "Kim".to_owned(),
                GroupIds::Multiple(vec!["org-1".to_owned(), "org-2".to_owned()]),
            ),
            GroupLeader::new("Lee".to_owned(), GroupIds::Single("org-3".to_owned())),
        ])
    }

    #[test]
    fn should_load_group_leaders() {
        let path = write_temp_file(
            "group_leaders.json",
            r#"[{"name": "Kim", "id": ["org-1", "org-2"]}, {"name": "Lee", "id": "org-3"}]"#,
        );

        let group_leaders = GroupLeaders::load(&path).unwrap();

        assert_eq!(*get_group_leaders(), *group_leaders);
    }

    #[test]
    fn should_fail_to_load_missing_file() {
        let path = Path::new("/this/file/does/not/exist.json");

        let error = GroupLeaders::load(path).unwrap_err();

        assert!(matches!(error, CantReadGroupLeadersFile(_)));
    }

    #[test]
    fn should_fail_to_load_malformed_file() {
        let path = write_temp_file("malformed_group_leaders.json", r#"[{"name": "Kim"}]"#);

        let error = GroupLeaders::load(&path).unwrap_err();

        assert!(matches!(error, MalformedGroupLeadersFile(_)));
    }

    #[test]
    fn should_find_leader() {
        let group_leaders = get_group_leaders();

        let leader = group_leaders.find("Lee").unwrap();

        assert_eq!(&["org-3".to_owned()], leader.group_ids());
    }

    #[test]
    fn should_not_find_leader_when_name_differs() {
        let group_leaders = get_group_leaders();

        assert_eq!(None, group_leaders.find("kim"));
        assert_eq!(None, group_leaders.find("Kim "));
        assert_eq!(None, group_leaders.find("Park"));
    }
}
