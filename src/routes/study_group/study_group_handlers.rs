use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use log::info;

use super::study_group_models::{
    GetStudyGroupsResponse, JoinGroupResponse, LeaveGroupResponse, Member, MembershipRequest,
    StudyGroup,
};
use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{study_group::StudyGroup as StudyGroupRecord, user::User};
use crate::state::AppState;
use crate::store::StoreError;

const JOIN_FAILED: &str = "An error occurred while joining the group";
const LEAVE_FAILED: &str = "An error occurred while leaving the group";

// Handler to get every study group with its members
pub async fn get_study_groups(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    info!("Received request to list study groups from user {}", caller.user_id);

    let groups = state.groups.list().await?;
    if groups.is_empty() {
        return Err(AppError::NotFound("No study groups found.".into()));
    }

    let mut members_by_group: HashMap<i32, Vec<Member>> = HashMap::new();
    for member in state.groups.list_all_members().await? {
        members_by_group
            .entry(member.group_id)
            .or_default()
            .push(member.into());
    }

    let study_groups = groups
        .into_iter()
        .map(|group| StudyGroup {
            members: members_by_group.remove(&group.group_id).unwrap_or_default(),
            id: group.group_id,
            name: group.group_name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(GetStudyGroupsResponse { study_groups }))
}

pub async fn join_study_group(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    req: web::Json<MembershipRequest>,
) -> Result<HttpResponse, AppError> {
    let group_id = required_group_id(&req)?;
    info!("User {} requested to join group {}", caller.user_id, group_id);

    let fail = |e: StoreError| AppError::internal(JOIN_FAILED, e);
    let (group, user) = load_group_and_caller(&state, group_id, caller, fail).await?;

    if state.groups.is_member(group.group_id, user.user_id).await.map_err(fail)? {
        info!("User {} is already a member of group {}", user.user_id, group.group_id);
        return Err(already_member());
    }

    match state.groups.add_member(group.group_id, user.user_id).await {
        Ok(()) => {}
        // lost a race against a concurrent join for the same pair
        Err(StoreError::UniqueViolation) => return Err(already_member()),
        Err(e) => return Err(fail(e)),
    }

    let members = current_members(&state, group.group_id, fail).await?;
    info!("User {} joined group {}", user.user_id, group.group_id);
    Ok(HttpResponse::Ok().json(JoinGroupResponse {
        message: "Joined group successfully".into(),
        members,
        new_member: Member::from(&user),
    }))
}

pub async fn leave_study_group(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    req: web::Json<MembershipRequest>,
) -> Result<HttpResponse, AppError> {
    let group_id = required_group_id(&req)?;
    info!("User {} requested to leave group {}", caller.user_id, group_id);

    let fail = |e: StoreError| AppError::internal(LEAVE_FAILED, e);
    let (group, user) = load_group_and_caller(&state, group_id, caller, fail).await?;

    if !state.groups.remove_member(group.group_id, user.user_id).await.map_err(fail)? {
        info!("User {} is not a member of group {}", user.user_id, group.group_id);
        return Err(AppError::BadRequest("You are not a member of this group".into()));
    }

    let members = current_members(&state, group.group_id, fail).await?;
    info!("User {} left group {}", user.user_id, group.group_id);
    Ok(HttpResponse::Ok().json(LeaveGroupResponse {
        message: "Left group successfully".into(),
        members,
    }))
}

// A missing or zero groupId is treated as absent.
fn required_group_id(req: &MembershipRequest) -> Result<i32, AppError> {
    match req.group_id {
        Some(group_id) if group_id != 0 => Ok(group_id),
        _ => Err(AppError::BadRequest("Group ID is required".into())),
    }
}

async fn load_group_and_caller(
    state: &AppState,
    group_id: i32,
    caller: AuthenticatedUser,
    fail: impl Fn(StoreError) -> AppError,
) -> Result<(StudyGroupRecord, User), AppError> {
    let group = state
        .groups
        .find_by_id(group_id)
        .await
        .map_err(&fail)?
        .ok_or_else(|| AppError::NotFound("Study group not found".into()))?;

    let user = state
        .users
        .find_by_id(caller.user_id)
        .await
        .map_err(&fail)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok((group, user))
}

async fn current_members(
    state: &AppState,
    group_id: i32,
    fail: impl Fn(StoreError) -> AppError,
) -> Result<Vec<Member>, AppError> {
    let members = state.groups.list_members(group_id).await.map_err(fail)?;
    Ok(members.into_iter().map(Member::from).collect())
}

fn already_member() -> AppError {
    AppError::BadRequest("You are already a member of this group".into())
}
