//! # Sandbox Tests
//!
//! `add_post` and `get_all_posts` against a real NEAR sandbox. Each test gets
//! its own sandbox and contract account.
//!
//! Build the contract with `cargo near build` first, or point
//! `SOCIAL_CONTRACT_WASM` at a build. Without a build these tests skip.

mod helpers;

use helpers::*;
use sandbox_harness::{BoxError, NewPost, PostId, TestContext};
use serde_json::json;

/// Tests that `add_post` returns the post it stored, tags split on commas
#[tokio::test]
async fn test_add_post_returns_post() -> Result<(), BoxError> {
    in_sandbox(add_post_returns_post).await?;
    Ok(())
}

async fn add_post_returns_post(ctx: TestContext) -> Result<(), BoxError> {
    let post = ctx
        .social()
        .add_post(&ctx.root, &NewPost::new("Test").tags(["tag1", "tag2", "tag3"]))
        .await?;

    assert_eq!(post.title, "Test");
    assert_eq!(post.tags[2], "tag3");
    assert_eq!(post.id, PostId(0));
    assert_eq!(post.owner_id, ctx.root.id, "Root account signed the call");
    assert!(post.users_who_liked.is_empty());

    Ok(())
}

/// Tests that the contract is deployed into a fresh sub-account of the root account
#[tokio::test]
async fn test_contract_deployed_under_root() -> Result<(), BoxError> {
    in_sandbox(contract_deployed_under_root).await?;
    Ok(())
}

async fn contract_deployed_under_root(ctx: TestContext) -> Result<(), BoxError> {
    assert_eq!(ctx.contract.id(), &ctx.contract_account.id);
    assert!(
        ctx.contract_account
            .id
            .as_str()
            .ends_with(&format!(".{}", ctx.root.id)),
        "{} should be a sub-account of {}",
        ctx.contract_account.id,
        ctx.root.id
    );
    assert!(ctx.social().get_all_posts().await?.is_empty());

    Ok(())
}

/// Tests that three sequential posts come back from `get_all_posts` in insertion order
#[tokio::test]
async fn test_get_all_posts_after_three_adds() -> Result<(), BoxError> {
    in_sandbox(get_all_posts_after_three_adds).await?;
    Ok(())
}

async fn get_all_posts_after_three_adds(ctx: TestContext) -> Result<(), BoxError> {
    let social = ctx.social();
    let tag_sets = [["tag1", "tag2", "tag3"], ["tag4", "tag5", "tag6"], ["tag1", "tag5", "tag7"]];

    for (i, tags) in tag_sets.iter().enumerate() {
        social
            .add_post(
                &ctx.root,
                &NewPost::new(format!("Test{i}"))
                    .description(format!("Test Description{i}"))
                    .tags(tags)
                    .media("post"),
            )
            .await?;
    }

    let posts = social.get_all_posts().await?;

    assert_eq!(posts.len(), 3);
    assert_eq!(posts[1].1.title, "Test1");
    assert_eq!(posts[2].1.description, "Test Description2");
    for (i, (id, post)) in posts.iter().enumerate() {
        assert_eq!(*id, PostId(i as u128));
        assert_eq!(post.id, *id);
        assert_eq!(post.tags, tag_sets[i]);
    }

    Ok(())
}

/// Tests that a title survives the call and the later read unchanged
#[tokio::test]
async fn test_title_round_trip() -> Result<(), BoxError> {
    in_sandbox(title_round_trip).await?;
    Ok(())
}

async fn title_round_trip(ctx: TestContext) -> Result<(), BoxError> {
    let title = "Ünïcode, commas, and \"quotes\"";
    let social = ctx.social();

    let added = social
        .add_post(&ctx.root, &NewPost::new(title).tags(["t"]))
        .await?;
    let posts = social.get_all_posts().await?;

    assert_eq!(added.title, title);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].1.title, title);
    assert_eq!(posts[0].1, added);

    Ok(())
}

/// Tests the untyped call/view path on the same scenario
#[tokio::test]
async fn test_untyped_results() -> Result<(), BoxError> {
    in_sandbox(untyped_results).await?;
    Ok(())
}

async fn untyped_results(ctx: TestContext) -> Result<(), BoxError> {
    let result = ctx
        .contract
        .call_json(
            &ctx.root,
            "add_post",
            json!({
                "title": "Test",
                "description": "",
                "tags": "tag1,tag2,tag3",
                "media": ""
            }),
        )
        .await?;

    assert_eq!(result["title"], "Test");
    assert_eq!(result["tags"][2], "tag3");

    let all = ctx.contract.view_json("get_all_posts", json!({})).await?;
    assert_eq!(all[0][0], "0");
    assert_eq!(all[0][1]["title"], "Test");

    Ok(())
}

/// Tests that a call with missing arguments is rejected by the contract
#[tokio::test]
async fn test_add_post_with_missing_args_fails() -> Result<(), BoxError> {
    in_sandbox(add_post_with_missing_args_fails).await?;
    Ok(())
}

async fn add_post_with_missing_args_fails(ctx: TestContext) -> Result<(), BoxError> {
    let result = ctx
        .contract
        .call_json(&ctx.root, "add_post", json!({ "title": "Test" }))
        .await;

    assert!(result.is_err(), "Call without description, tags and media should fail");
    assert!(ctx.social().get_all_posts().await?.is_empty());

    Ok(())
}
