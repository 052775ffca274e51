use std::collections::HashMap;
use std::sync::Arc;

use error_stack::Report;
use time::OffsetDateTime;
use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{FilmQuery, RentalQuery, ReviewQuery, UserQuery};
use kernel::interface::update::{FilmModifier, RentalModifier, ReviewModifier, UserModifier};
use kernel::prelude::entity::{
    ExternalFilmId, Film, FilmId, Rental, RentalId, RentalProgress, Review, SelectLimit,
    SelectOffset, User, UserCredits, UserId,
};
use kernel::KernelError;

#[derive(Debug, Clone, Default)]
struct MemoryStore {
    users: HashMap<UserId, User>,
    films: HashMap<FilmId, Film>,
    rentals: Vec<Rental>,
    reviews: Vec<Review>,
}

/// Process-local ledger store.
///
/// A transaction holds the store's lock from `transact` until it is committed
/// or dropped, so transactions are fully serialized. Writes go to a private
/// copy that replaces the shared state only on `commit`.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    store: Arc<Mutex<MemoryStore>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryStore>,
    working: MemoryStore,
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<MemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        let working = MemoryStore::clone(&guard);
        Ok(MemoryTransaction { guard, working })
    }
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let MemoryTransaction { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

fn newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> OffsetDateTime,
{
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
}

#[async_trait::async_trait]
impl UserQuery for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.working.users.get(id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut MemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        // the whole store is already locked by the transaction
        Ok(con.working.users.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl UserModifier for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        if con.working.users.contains_key(user.id()) {
            return Err(Report::new(KernelError::AlreadyExists)
                .attach_printable(format!("user {} already exists", user.id().as_ref())));
        }
        con.working.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn update_credits(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
        credits: &UserCredits,
    ) -> error_stack::Result<(), KernelError> {
        if !credits.is_valid() {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("credits {} violate users_credits_check", credits.as_ref())));
        }
        let user = con.working.users.get_mut(user_id).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("user {} does not exist", user_id.as_ref()))
        })?;
        user.substitute(|user| *user.credits = *credits);
        Ok(())
    }
}

#[async_trait::async_trait]
impl FilmQuery for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &FilmId,
    ) -> error_stack::Result<Option<Film>, KernelError> {
        Ok(con.working.films.get(id).cloned())
    }

    async fn find_by_external_id(
        &self,
        con: &mut MemoryTransaction,
        external_id: &ExternalFilmId,
    ) -> error_stack::Result<Option<Film>, KernelError> {
        Ok(con
            .working
            .films
            .values()
            .find(|film| film.external_id() == external_id)
            .cloned())
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Film>, KernelError> {
        let mut films = con.working.films.values().cloned().collect::<Vec<_>>();
        films.sort_by(|a, b| {
            a.title()
                .as_ref()
                .cmp(b.title().as_ref())
                .then_with(|| a.id().as_ref().cmp(b.id().as_ref()))
        });
        let offset = usize::try_from(*offset.as_ref()).unwrap_or(0);
        let limit = usize::try_from(*limit.as_ref()).unwrap_or(0);
        Ok(films.into_iter().skip(offset).take(limit).collect())
    }
}

#[async_trait::async_trait]
impl FilmModifier for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        film: &Film,
    ) -> error_stack::Result<(), KernelError> {
        let duplicated = con.working.films.values().any(|existing| {
            existing.id() == film.id() || existing.external_id() == film.external_id()
        });
        if duplicated {
            return Err(Report::new(KernelError::AlreadyExists).attach_printable(format!(
                "film {} already exists",
                film.external_id().as_ref()
            )));
        }
        con.working.films.insert(film.id().clone(), film.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl RentalQuery for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn find_active(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
        film_id: &FilmId,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con
            .working
            .rentals
            .iter()
            .filter(|rental| rental.user_id() == user_id && rental.film_id() == film_id)
            .filter(|rental| rental.is_active(now))
            .max_by_key(|rental| *rental.created_at().as_ref())
            .cloned())
    }

    async fn find_by_user_and_film(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
        film_id: &FilmId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals = con
            .working
            .rentals
            .iter()
            .filter(|rental| rental.user_id() == user_id && rental.film_id() == film_id)
            .cloned()
            .collect::<Vec<_>>();
        newest_first(&mut rentals, |rental| *rental.created_at().as_ref());
        Ok(rentals)
    }

    async fn find_by_user_id(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals = con
            .working
            .rentals
            .iter()
            .filter(|rental| rental.user_id() == user_id)
            .cloned()
            .collect::<Vec<_>>();
        newest_first(&mut rentals, |rental| *rental.created_at().as_ref());
        Ok(rentals)
    }
}

#[async_trait::async_trait]
impl RentalModifier for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if con.working.rentals.iter().any(|r| r.id() == rental.id()) {
            return Err(Report::new(KernelError::AlreadyExists)
                .attach_printable(format!("rental {} already exists", rental.id().as_ref())));
        }
        con.working.rentals.push(rental.clone());
        Ok(())
    }

    async fn advance_progress(
        &self,
        con: &mut MemoryTransaction,
        rental_id: &RentalId,
        progress: &RentalProgress,
    ) -> error_stack::Result<RentalProgress, KernelError> {
        let rental = con
            .working
            .rentals
            .iter_mut()
            .find(|rental| rental.id() == rental_id)
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("rental {} does not exist", rental_id.as_ref()))
            })?;
        rental.substitute(|rental| *rental.progress = rental.progress.furthest(*progress));
        Ok(*rental.progress())
    }
}

#[async_trait::async_trait]
impl ReviewQuery for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn find_by_user_and_film(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
        film_id: &FilmId,
    ) -> error_stack::Result<Option<Review>, KernelError> {
        Ok(con
            .working
            .reviews
            .iter()
            .find(|review| review.user_id() == user_id && review.film_id() == film_id)
            .cloned())
    }

    async fn find_by_film_id(
        &self,
        con: &mut MemoryTransaction,
        film_id: &FilmId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let mut reviews = con
            .working
            .reviews
            .iter()
            .filter(|review| review.film_id() == film_id)
            .cloned()
            .collect::<Vec<_>>();
        newest_first(&mut reviews, |review| *review.created_at().as_ref());
        Ok(reviews)
    }
}

#[async_trait::async_trait]
impl ReviewModifier for MemoryDatabase {
    type Transaction = MemoryTransaction;

    async fn save(
        &self,
        con: &mut MemoryTransaction,
        review: &Review,
    ) -> error_stack::Result<Review, KernelError> {
        let existing = con.working.reviews.iter_mut().find(|existing| {
            existing.user_id() == review.user_id() && existing.film_id() == review.film_id()
        });
        if let Some(existing) = existing {
            existing.substitute(|existing| {
                *existing.rating = *review.rating();
                *existing.updated_at = review.updated_at().clone();
            });
            return Ok(existing.clone());
        }
        if con.working.reviews.iter().any(|existing| existing.id() == review.id()) {
            return Err(Report::new(KernelError::AlreadyExists)
                .attach_printable(format!("review {} already exists", review.id().as_ref())));
        }
        con.working.reviews.push(review.clone());
        Ok(review.clone())
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{RentalQuery, UserQuery};
    use kernel::interface::update::{RentalModifier, ReviewModifier, UserModifier};
    use kernel::prelude::entity::{
        CreatedAt, ExternalFilmId, Film, FilmDuration, FilmId, FilmTitle, IsAdmin, Rental,
        RentalId, RentalPolicy, RentalPrice, RentalProgress, Review, ReviewId, ReviewRating,
        UpdatedAt, User, UserCredits, UserId, UserName,
    };
    use kernel::KernelError;

    use crate::database::MemoryDatabase;

    fn user() -> User {
        User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new("viewer"),
            UserCredits::new(10),
            IsAdmin::new(false),
        )
    }

    fn film() -> Film {
        Film::new(
            FilmId::new(Uuid::new_v4()),
            ExternalFilmId::new("tt0111161"),
            FilmTitle::new("Film"),
            FilmDuration::new(3600),
            RentalPrice::new(10),
        )
    }

    #[tokio::test]
    async fn uncommitted_writes_are_discarded() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let user = user();

        let mut con = db.transact().await?;
        UserModifier::create(&db, &mut con, &user).await?;
        drop(con);

        let mut con = db.transact().await?;
        assert!(UserQuery::find_by_id(&db, &mut con, user.id()).await?.is_none());
        UserModifier::create(&db, &mut con, &user).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        assert_eq!(
            UserQuery::find_by_id(&db, &mut con, user.id()).await?,
            Some(user.clone())
        );
        db.update_credits(&mut con, user.id(), &UserCredits::new(3))
            .await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        let found = UserQuery::find_by_id(&db, &mut con, user.id()).await?;
        assert_eq!(found.map(|u| *u.credits()), Some(UserCredits::new(10)));
        Ok(())
    }

    #[tokio::test]
    async fn negative_credits_are_rejected() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let user = user();
        let mut con = db.transact().await?;
        UserModifier::create(&db, &mut con, &user).await?;
        let result = db
            .update_credits(&mut con, user.id(), &UserCredits::new(-1))
            .await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn active_rental_depends_only_on_time() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let user = user();
        let film = film();
        let start = OffsetDateTime::now_utc();
        let rental = Rental::start(
            RentalId::new(Uuid::new_v4()),
            user.id().clone(),
            &film,
            &RentalPolicy::default(),
            start,
        );

        let mut con = db.transact().await?;
        RentalModifier::create(&db, &mut con, &rental).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let expiry = *rental.expires_at().as_ref();
        let at_expiry = db.find_active(&mut con, user.id(), film.id(), &expiry).await?;
        assert_eq!(at_expiry, Some(rental.clone()));
        let after = db
            .find_active(&mut con, user.id(), film.id(), &(expiry + Duration::seconds(1)))
            .await?;
        assert!(after.is_none());

        let history = db.find_by_user_and_film(&mut con, user.id(), film.id()).await?;
        assert_eq!(history, vec![rental]);
        Ok(())
    }

    #[tokio::test]
    async fn progress_is_max_merged() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let rental = Rental::start(
            RentalId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            &film(),
            &RentalPolicy::default(),
            OffsetDateTime::now_utc(),
        );
        let mut con = db.transact().await?;
        RentalModifier::create(&db, &mut con, &rental).await?;

        let stored = db
            .advance_progress(&mut con, rental.id(), &RentalProgress::new(900))
            .await?;
        assert_eq!(stored, RentalProgress::new(900));
        let stored = db
            .advance_progress(&mut con, rental.id(), &RentalProgress::new(300))
            .await?;
        assert_eq!(stored, RentalProgress::new(900));

        let missing = db
            .advance_progress(&mut con, &RentalId::new(Uuid::new_v4()), &RentalProgress::new(1))
            .await;
        assert_eq!(
            missing.map_err(|report| *report.current_context()),
            Err(KernelError::NotFound)
        );
        Ok(())
    }

    #[tokio::test]
    async fn saving_a_second_review_edits_the_first() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new();
        let user_id = UserId::new(Uuid::new_v4());
        let film_id = FilmId::new(Uuid::new_v4());
        let posted = OffsetDateTime::now_utc();
        let review = |rating: i32, at: OffsetDateTime| {
            Review::new(
                ReviewId::new(Uuid::new_v4()),
                user_id.clone(),
                film_id.clone(),
                ReviewRating::new(rating),
                CreatedAt::new(at),
                UpdatedAt::new(at),
            )
        };

        let mut con = db.transact().await?;
        let first = review(5, posted);
        assert_eq!(db.save(&mut con, &first).await?, first);

        let later = posted + Duration::minutes(1);
        let edited = db.save(&mut con, &review(2, later)).await?;
        assert_eq!(edited.id(), first.id());
        assert_eq!(edited.created_at(), first.created_at());
        assert_eq!(edited.rating(), &ReviewRating::new(2));
        assert_eq!(edited.updated_at(), &UpdatedAt::new(later));

        let stored =
            kernel::interface::query::ReviewQuery::find_by_film_id(&db, &mut con, &film_id)
                .await?;
        assert_eq!(stored, vec![edited]);
        Ok(())
    }
}
