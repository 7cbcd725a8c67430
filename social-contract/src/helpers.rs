use crate::*;

impl Contract {
    // Append the post to the list of every tag it carries
    pub(crate) fn index_post_by_tags(&mut self, post: &Post) {
        for tag in &post.tags {
            match self.posts_by_tag.get_mut(tag) {
                Some(posts) => posts.push(post.clone()),
                None => {
                    self.posts_by_tag.insert(tag.clone(), vec![post.clone()]);
                }
            }
        }
    }

    // Append the post to the liker's list of liked posts
    pub(crate) fn record_like(&mut self, account_id: AccountId, post: &Post) {
        match self.likes_by_user_id.get_mut(&account_id) {
            Some(liked) => liked.push(post.clone()),
            None => {
                self.likes_by_user_id.insert(account_id, vec![post.clone()]);
            }
        }
    }
}
