//! Due-list: a deadline-ordered doubly linked list of pending escrow
//! expirations.
//!
//! Nodes are addressed by escrow id (an arena-by-id layout, not raw links),
//! with `0` as the nil link — escrow ids are 1-based. The list is always
//! sorted ascending by deadline, with FIFO order for equal deadlines. Exactly
//! one node exists per non-terminal escrow; the node is removed the moment
//! its escrow is released or cancelled, whether by expiry or direct action.

use soroban_sdk::{Env, Vec};

use crate::types::{CronJob, DataKey, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD};

/// Nil link marker.
pub const NONE: u64 = 0;

pub fn get_job(env: &Env, id: u64) -> Option<CronJob> {
    let key = DataKey::CronJob(id);
    let job = env.storage().persistent().get::<_, CronJob>(&key);
    if job.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    job
}

fn save_job(env: &Env, job: &CronJob) {
    let key = DataKey::CronJob(job.id);
    env.storage().persistent().set(&key, job);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

fn delete_job(env: &Env, id: u64) {
    env.storage().persistent().remove(&DataKey::CronJob(id));
}

pub fn head(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CronHead)
        .unwrap_or(NONE)
}

fn set_head(env: &Env, id: u64) {
    env.storage().instance().set(&DataKey::CronHead, &id);
}

/// Link a new node for `id` at its deadline position: before the first node
/// with a strictly greater deadline, so equal deadlines keep insertion order.
/// Walks from the head; insertion happens once per escrow, at creation.
pub fn insert(env: &Env, id: u64, deadline: u64) {
    let mut prev = NONE;
    let mut cursor = head(env);
    while cursor != NONE {
        let node = get_job(env, cursor).unwrap();
        if node.deadline > deadline {
            break;
        }
        prev = cursor;
        cursor = node.next;
    }

    let job = CronJob {
        id,
        deadline,
        prev,
        next: cursor,
    };
    save_job(env, &job);

    if prev == NONE {
        set_head(env, id);
    } else {
        let mut prev_node = get_job(env, prev).unwrap();
        prev_node.next = id;
        save_job(env, &prev_node);
    }
    if cursor != NONE {
        let mut next_node = get_job(env, cursor).unwrap();
        next_node.prev = id;
        save_job(env, &next_node);
    }
}

/// Splice the node for `id` out of the list in O(1) via its stored links.
/// No-op if the escrow has no pending node.
pub fn remove(env: &Env, id: u64) {
    let job = match get_job(env, id) {
        Some(job) => job,
        None => return,
    };
    unlink(env, &job);
}

fn unlink(env: &Env, job: &CronJob) {
    if job.prev == NONE {
        set_head(env, job.next);
    } else {
        let mut prev_node = get_job(env, job.prev).unwrap();
        prev_node.next = job.next;
        save_job(env, &prev_node);
    }
    if job.next != NONE {
        let mut next_node = get_job(env, job.next).unwrap();
        next_node.prev = job.prev;
        save_job(env, &next_node);
    }
    delete_job(env, job.id);
}

/// Pop every node whose deadline has passed, stopping at the first non-due
/// node or after `cap` nodes. Returns the popped escrow ids in deadline
/// order; the caller cancels each one. The cap bounds the work any single
/// call can be made to absorb from a backlog accumulated by unrelated actors.
pub fn pop_due(env: &Env, now: u64, cap: u32) -> Vec<u64> {
    let mut due = Vec::new(env);
    let mut processed = 0u32;
    while processed < cap {
        let head_id = head(env);
        if head_id == NONE {
            break;
        }
        let job = get_job(env, head_id).unwrap();
        if job.deadline > now {
            break;
        }
        unlink(env, &job);
        due.push_back(head_id);
        processed += 1;
    }
    due
}
