//! End-to-end behaviour of the ledger, deriver, registry and completion
//! workflow over the in-memory store.

use std::sync::Arc;

use matchwork::domain::ports::{
    CompletionCommand, CompletionQuery, InterestCommand, InterestQuery, MatchQuery,
};
use matchwork::domain::{
    CompletionActor, CompletionWorkflowService, EmployerId, EmployerInterestRequest, ErrorCode,
    InterestLedgerService, InterestOutcome, JobCompletionPolicy, JobId, JobStatus, MatchKey,
    MatchRegistryService, MatchStatus, StudentId, StudentInterestRequest,
};
use matchwork::test_support::InMemoryStore;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Ledger = InterestLedgerService<InMemoryStore, InMemoryStore, InMemoryStore>;

struct World {
    store: Arc<InMemoryStore>,
    ledger: Ledger,
    registry: MatchRegistryService<InMemoryStore>,
    completion: CompletionWorkflowService<InMemoryStore>,
}

impl World {
    fn with_policy(policy: JobCompletionPolicy) -> Self {
        let store = Arc::new(InMemoryStore::new());
        store.seed_job(job(), employer());
        Self {
            ledger: InterestLedgerService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::new(DefaultClock),
            ),
            registry: MatchRegistryService::new(Arc::clone(&store)),
            completion: CompletionWorkflowService::new(Arc::clone(&store), policy),
            store,
        }
    }

    async fn student_likes(&self, student_id: StudentId, interested: bool) -> InterestOutcome {
        self.ledger
            .record_student_interest(StudentInterestRequest {
                student_id,
                job_id: job(),
                interested,
            })
            .await
            .expect("student interest recorded")
    }

    async fn employer_likes(&self, student_id: StudentId, interested: bool) -> InterestOutcome {
        self.ledger
            .record_employer_interest(EmployerInterestRequest {
                employer_id: employer(),
                student_id,
                job_id: job(),
                interested,
            })
            .await
            .expect("employer interest recorded")
    }
}

fn student() -> StudentId {
    StudentId::new(7).expect("student id")
}

fn employer() -> EmployerId {
    EmployerId::new(3).expect("employer id")
}

fn job() -> JobId {
    JobId::new(42).expect("job id")
}

fn key() -> MatchKey {
    MatchKey {
        student_id: student(),
        employer_id: employer(),
        job_id: job(),
    }
}

#[fixture]
fn world() -> World {
    World::with_policy(JobCompletionPolicy::FirstMatch)
}

#[rstest]
#[tokio::test]
async fn student_seven_and_employer_three_complete_job_forty_two(world: World) {
    assert_eq!(world.employer_likes(student(), true).await, InterestOutcome::Saved);
    let InterestOutcome::MatchFound { match_id } = world.student_likes(student(), true).await
    else {
        panic!("student like should complete the match");
    };

    let listed = world
        .registry
        .list_for_student(student())
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|m| m.status), Some(MatchStatus::Pending));

    let progress = world
        .completion
        .mark_student_complete(match_id, student(), job())
        .await
        .expect("student confirms");
    assert_eq!(progress.status, MatchStatus::AwaitingEmployer);
    assert_eq!(world.store.job_status(job()), Some(JobStatus::Open));

    let progress = world
        .completion
        .mark_employer_complete(match_id, employer(), job())
        .await
        .expect("employer confirms");
    assert!(progress.student_done && progress.employer_done);
    assert_eq!(progress.status, MatchStatus::Completed);
    assert_eq!(world.store.job_status(job()), Some(JobStatus::Completed));
    assert!(world
        .registry
        .has_completed_match(key())
        .await
        .expect("lookup"));
}

#[rstest]
#[case::student_first(true)]
#[case::employer_first(false)]
#[tokio::test]
async fn either_arrival_order_yields_one_match(world: World, #[case] student_first: bool) {
    if student_first {
        assert_eq!(world.student_likes(student(), true).await, InterestOutcome::Saved);
        assert!(world.employer_likes(student(), true).await.is_match());
    } else {
        assert_eq!(world.employer_likes(student(), true).await, InterestOutcome::Saved);
        assert!(world.student_likes(student(), true).await.is_match());
    }

    let rows = world.store.match_rows();
    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|row| row.is_match));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_likes_converge_on_one_match() {
    for _ in 0..50 {
        let world = Arc::new(World::with_policy(JobCompletionPolicy::FirstMatch));
        let student_side = {
            let world = Arc::clone(&world);
            tokio::spawn(async move { world.student_likes(student(), true).await })
        };
        let employer_side = {
            let world = Arc::clone(&world);
            tokio::spawn(async move { world.employer_likes(student(), true).await })
        };
        let (a, b) = (
            student_side.await.expect("join"),
            employer_side.await.expect("join"),
        );

        assert!(a.is_match() || b.is_match(), "one side must observe the other");
        let rows = world.store.match_rows();
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|row| row.is_match));
    }
}

#[rstest]
#[case(true, false)]
#[case(false, true)]
#[case(false, false)]
#[tokio::test]
async fn no_match_without_mutual_interest(
    world: World,
    #[case] student_interested: bool,
    #[case] employer_interested: bool,
) {
    world.student_likes(student(), student_interested).await;
    world.employer_likes(student(), employer_interested).await;

    assert!(world.store.match_rows().is_empty());
    assert!(world
        .registry
        .list_for_employer(employer())
        .await
        .expect("list")
        .is_empty());
}

#[rstest]
#[tokio::test]
async fn repeated_submissions_keep_one_interest_row(world: World) {
    world.student_likes(student(), true).await;
    world.student_likes(student(), false).await;
    world.student_likes(student(), true).await;

    let liked = world
        .ledger
        .list_liked_jobs(student())
        .await
        .expect("list");
    assert_eq!(liked.len(), 1);
}

#[rstest]
#[tokio::test]
async fn later_dislike_keeps_the_match(world: World) {
    world.student_likes(student(), true).await;
    world.employer_likes(student(), true).await;
    world.student_likes(student(), false).await;
    world.employer_likes(student(), false).await;

    let rows = world.store.match_rows();
    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|row| row.is_match));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_confirmations_converge_on_completed(world: World) {
    world.student_likes(student(), true).await;
    let InterestOutcome::MatchFound { match_id } = world.employer_likes(student(), true).await
    else {
        panic!("expected match");
    };

    let world = Arc::new(world);
    let student_side = {
        let world = Arc::clone(&world);
        tokio::spawn(async move {
            world
                .completion
                .mark_student_complete(match_id, student(), job())
                .await
        })
    };
    let employer_side = {
        let world = Arc::clone(&world);
        tokio::spawn(async move {
            world
                .completion
                .mark_employer_complete(match_id, employer(), job())
                .await
        })
    };
    student_side.await.expect("join").expect("student confirms");
    employer_side.await.expect("join").expect("employer confirms");

    let stored = world.registry.get_match(match_id).await.expect("match");
    assert!(stored.student_completed && stored.employer_completed);
    assert_eq!(stored.status, MatchStatus::Completed);
    assert_eq!(world.store.job_status(job()), Some(JobStatus::Completed));
}

#[rstest]
#[tokio::test]
async fn partial_confirmation_is_visible_to_both_parties(world: World) {
    world.student_likes(student(), true).await;
    let InterestOutcome::MatchFound { match_id } = world.employer_likes(student(), true).await
    else {
        panic!("expected match");
    };
    world
        .completion
        .mark_student_complete(match_id, student(), job())
        .await
        .expect("student confirms");

    for viewer in [
        CompletionActor::Student(student()),
        CompletionActor::Employer(employer()),
    ] {
        let progress = world
            .completion
            .get_progress(match_id, job(), viewer)
            .await
            .expect("progress");
        assert!(progress.student_done);
        assert!(!progress.employer_done);
        assert_eq!(progress.status, MatchStatus::AwaitingEmployer);
    }
}

#[rstest]
#[tokio::test]
async fn strangers_cannot_confirm(world: World) {
    world.student_likes(student(), true).await;
    let InterestOutcome::MatchFound { match_id } = world.employer_likes(student(), true).await
    else {
        panic!("expected match");
    };

    let stranger = StudentId::new(8).expect("id");
    let err = world
        .completion
        .mark_student_complete(match_id, stranger, job())
        .await
        .expect_err("stranger");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let other_employer = EmployerId::new(4).expect("id");
    let err = world
        .completion
        .mark_employer_complete(match_id, other_employer, job())
        .await
        .expect_err("other employer");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let stored = world.registry.get_match(match_id).await.expect("match");
    assert!(!stored.student_completed && !stored.employer_completed);
}

#[rstest]
#[tokio::test]
async fn all_matches_policy_waits_for_every_match() {
    let world = World::with_policy(JobCompletionPolicy::AllMatches);
    let second_student = StudentId::new(9).expect("id");
    let mut match_ids = Vec::new();
    for candidate in [student(), second_student] {
        world.student_likes(candidate, true).await;
        let InterestOutcome::MatchFound { match_id } = world.employer_likes(candidate, true).await
        else {
            panic!("expected match");
        };
        match_ids.push((candidate, match_id));
    }

    for (index, (candidate, match_id)) in match_ids.into_iter().enumerate() {
        world
            .completion
            .mark_student_complete(match_id, candidate, job())
            .await
            .expect("student confirms");
        world
            .completion
            .mark_employer_complete(match_id, employer(), job())
            .await
            .expect("employer confirms");

        let expected = if index == 0 {
            JobStatus::Open
        } else {
            JobStatus::Completed
        };
        assert_eq!(world.store.job_status(job()), Some(expected));
    }
}

#[rstest]
#[tokio::test]
async fn outage_surfaces_as_service_unavailable(world: World) {
    world.store.set_unavailable(true);
    let err = world
        .ledger
        .record_student_interest(StudentInterestRequest {
            student_id: student(),
            job_id: job(),
            interested: true,
        })
        .await
        .expect_err("store down");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
