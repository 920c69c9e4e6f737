use serde::{Deserialize, Serialize};

use crate::models::{group_membership::GroupMember, user::User};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Member {
    pub id: i32,
    pub username: String,
}

impl From<GroupMember> for Member {
    fn from(member: GroupMember) -> Self {
        Member {
            id: member.user_id,
            username: member.user_name,
        }
    }
}

impl From<&User> for Member {
    fn from(user: &User) -> Self {
        Member {
            id: user.user_id,
            username: user.user_name.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct StudyGroup {
    pub id: i32,
    pub name: String,
    pub members: Vec<Member>,
}

// list of groups
#[derive(Serialize)]
pub struct GetStudyGroupsResponse {
    pub study_groups: Vec<StudyGroup>,
}

// Body of both join and leave
#[derive(Deserialize)]
pub struct MembershipRequest {
    #[serde(rename = "groupId", default)]
    pub group_id: Option<i32>,
}

#[derive(Serialize)]
pub struct JoinGroupResponse {
    pub message: String,
    pub members: Vec<Member>,
    #[serde(rename = "newMember")]
    pub new_member: Member,
}

#[derive(Serialize)]
pub struct LeaveGroupResponse {
    pub message: String,
    pub members: Vec<Member>,
}
