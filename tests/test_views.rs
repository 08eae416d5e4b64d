//! Integration tests for the derived views.
//!
//! Tests cover:
//! - Switching the available collection on the list permission
//! - Personal and team filters over the full collection
//! - Team project quota arithmetic, including the unlimited sentinel
//! - The create permission being asked of the oracle

mod common;

use common::*;

fn team_projects(count: usize) -> Vec<Project> {
    (0..count)
        .map(|i| {
            make_project(
                &format!("team-{}", i),
                &format!("Team {}", i),
                ProjectType::Team,
                &[(ACTOR_ID, ProjectRole::Admin)],
            )
        })
        .collect()
}

#[tokio::test]
async fn test_available_projects_switches_whole_collection() -> anyhow::Result<()> {
    // 1. Owner with list permission sees the full collection
    let owner = make_loaded_store(OWNER_SCOPES).await;
    assert_eq!(owner.available_projects(), owner.all_projects());
    assert_eq!(owner.available_projects().len(), 5);

    // 2. Member without it sees exactly "mine", even though "all" is loaded
    let member = make_loaded_store(MEMBER_SCOPES).await;
    assert_eq!(member.all_projects().len(), 5);
    assert_eq!(member.available_projects(), member.my_projects());
    assert_eq!(ids(&member.available_projects()), ["personal-1", "team-1"]);

    Ok(())
}

#[tokio::test]
async fn test_type_filters_use_all_projects() -> anyhow::Result<()> {
    let member = make_loaded_store(MEMBER_SCOPES).await;

    // Filters read the master collection, not the permission-scoped one
    assert_eq!(ids(&member.personal_projects()), ["personal-1", "personal-2"]);
    assert_eq!(ids(&member.team_projects()), ["team-1", "team-2"]);

    Ok(())
}

#[tokio::test]
async fn test_limit_reached_blocks_creation() -> anyhow::Result<()> {
    let store = make_store_with(team_projects(5), OWNER_SCOPES, 5);
    store.load_counts().await?;

    assert!(store.is_team_project_feature_enabled());
    assert!(!store.has_unlimited_projects());
    assert!(store.is_team_project_limit_exceeded());
    assert!(!store.can_create_projects());

    Ok(())
}

#[tokio::test]
async fn test_below_limit_allows_creation() -> anyhow::Result<()> {
    let store = make_store_with(team_projects(4), OWNER_SCOPES, 5);
    store.load_counts().await?;

    assert!(!store.is_team_project_limit_exceeded());
    assert!(store.can_create_projects());

    Ok(())
}

#[tokio::test]
async fn test_disabled_feature_blocks_creation() -> anyhow::Result<()> {
    let store = make_store_with(Vec::new(), OWNER_SCOPES, 0);
    store.load_counts().await?;

    assert_eq!(store.projects_count().team, 0);
    assert!(!store.is_team_project_feature_enabled());
    assert!(!store.can_create_projects());

    Ok(())
}

#[tokio::test]
async fn test_unlimited_always_allows_creation() -> anyhow::Result<()> {
    let store = make_store_with(team_projects(50), OWNER_SCOPES, -1);
    store.load_counts().await?;

    assert_eq!(store.projects_count().team, 50);
    assert!(store.has_unlimited_projects());
    assert!(store.can_create_projects());

    let view = store.view();
    assert_eq!(view.team_projects_limit, TeamProjectsLimit::UNLIMITED);
    assert!(view.can_create_projects);

    Ok(())
}

#[tokio::test]
async fn test_create_permission_comes_from_oracle() -> anyhow::Result<()> {
    assert!(make_store(OWNER_SCOPES).has_permission_to_create_projects());
    assert!(!make_store(MEMBER_SCOPES).has_permission_to_create_projects());

    let view = make_store(MEMBER_SCOPES).view();
    assert!(!view.has_permission_to_create_projects);

    Ok(())
}

#[tokio::test]
async fn test_view_serializes_for_consumers() -> anyhow::Result<()> {
    let store = make_loaded_store(MEMBER_SCOPES).await;
    store.on_route_change(Route::new("/home/workflows")).await?;

    let json = serde_json::to_value(store.view())?;
    assert_eq!(json["activeSelection"], "home");
    assert_eq!(json["isProjectHome"], true);
    assert_eq!(json["availableProjects"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["projectsCount"]["team"], 2);
    assert_eq!(json["teamProjectsLimit"], -1);

    Ok(())
}
