use crate::*;
use near_sdk::test_utils::{VMContextBuilder, accounts};
use near_sdk::testing_env;

// Helper function to create a mock context
fn get_context(signer: AccountId) -> VMContextBuilder {
    let mut builder = VMContextBuilder::new();
    builder
        .current_account_id(accounts(0))
        .signer_account_id(signer.clone())
        .predecessor_account_id(signer);
    builder
}

fn set_signer(signer: AccountId) {
    testing_env!(get_context(signer).build());
}

// Helper function to create a contract with the three posts used across tests
fn setup_contract() -> Contract {
    set_signer(accounts(1));
    let mut contract = Contract::default();
    contract.add_post(
        "Test".to_string(),
        "Test Description".to_string(),
        "tag1,tag2,tag3".to_string(),
        "post".to_string(),
    );
    contract.add_post(
        "Test2".to_string(),
        "Test Description2".to_string(),
        "tag4,tag5,tag6".to_string(),
        "video".to_string(),
    );
    contract.add_post(
        "Test3".to_string(),
        "Test Description3".to_string(),
        "tag1,tag5,tag7".to_string(),
        "pic".to_string(),
    );
    contract
}

// Test that a post is returned with split tags and the signer as owner
#[test]
fn test_add_post() {
    set_signer(accounts(1));
    let mut contract = Contract::default();

    let post = contract.add_post(
        "Test".to_string(),
        "Test Description".to_string(),
        "tag1,tag2,tag3".to_string(),
        "post".to_string(),
    );

    assert_eq!(post.id, U128(0));
    assert_eq!(post.title, "Test");
    assert_eq!(post.tags, vec!["tag1", "tag2", "tag3"]);
    assert_eq!(post.owner_id, accounts(1));
    assert!(post.users_who_liked.is_empty());
    assert_eq!(contract.number_of_posts, 1);
}

// Test that tags are split verbatim without trimming
#[test]
fn test_add_post_tags_are_not_trimmed() {
    set_signer(accounts(1));
    let mut contract = Contract::default();

    let post = contract.add_post(
        "Spaced".to_string(),
        String::new(),
        "a, b,,c".to_string(),
        String::new(),
    );
    assert_eq!(post.tags, vec!["a", " b", "", "c"]);

    let empty = contract.add_post(
        "Empty".to_string(),
        String::new(),
        String::new(),
        String::new(),
    );
    assert_eq!(empty.tags, vec![""]);
}

// Test that all posts come back in insertion order with sequential ids
#[test]
fn test_get_all_posts_keeps_insertion_order() {
    let contract = setup_contract();

    let posts = contract.get_all_posts();

    assert_eq!(posts.len(), 3);
    for (index, (id, _)) in posts.iter().enumerate() {
        assert_eq!(id.0, index as u128);
    }
    assert_eq!(posts[1].1.title, "Test2");
    assert_eq!(posts[2].1.description, "Test Description3");
}

// Test that liking records the signer on the post and in their liked list
#[test]
fn test_like_a_post() {
    let mut contract = setup_contract();
    set_signer(accounts(2));

    let liked = contract.like_a_post(U128(0));

    assert_eq!(liked.users_who_liked, vec![accounts(2)]);
    assert_eq!(
        contract.get_all_posts()[0].1.users_who_liked,
        vec![accounts(2)]
    );
    assert_eq!(contract.get_liked_posts().len(), 1);
}

// Test that liking an unknown id returns a placeholder and changes nothing
#[test]
fn test_like_unknown_post() {
    let mut contract = setup_contract();

    let placeholder = contract.like_a_post(U128(42));

    assert_eq!(placeholder.id, U128(42));
    assert_eq!(placeholder.title, NO_POST_FOUND);
    assert_eq!(placeholder.media, NO_POST_FOUND);
    assert!(placeholder.tags.is_empty());
    assert!(
        contract
            .get_all_posts()
            .iter()
            .all(|(_, post)| post.users_who_liked.is_empty())
    );
    assert!(contract.likes_by_user_id.get(&accounts(1)).is_none());
}

// Test that liked posts are tracked per signer in the order they were liked
#[test]
fn test_get_liked_posts() {
    let mut contract = setup_contract();

    contract.like_a_post(U128(1));
    contract.like_a_post(U128(0));

    let liked = contract.get_liked_posts();
    assert_eq!(liked.len(), 2);
    assert_eq!(liked[0].title, "Test2");
    assert_eq!(liked[1].title, "Test");
}

// Test that an account without likes cannot list liked posts
#[test]
#[should_panic(expected = "UNABLE_TO_FIND_USERS_LIKED_POSTS")]
fn test_get_liked_posts_without_likes() {
    let contract = setup_contract();
    set_signer(accounts(3));

    contract.get_liked_posts();
}

// Test that posts are indexed under every tag they carry
#[test]
fn test_get_posts_by_tag() {
    let contract = setup_contract();

    let posts = contract.get_posts_by_tag("tag5".to_string());

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Test2");
    assert_eq!(posts[1].title, "Test3");
    assert_eq!(contract.get_posts_by_tag("tag2".to_string()).len(), 1);
}

// Test that an unknown tag cannot be listed
#[test]
#[should_panic(expected = "UNABLE_TO_FIND_POSTS")]
fn test_get_posts_by_unknown_tag() {
    let contract = setup_contract();

    contract.get_posts_by_tag("missing".to_string());
}
