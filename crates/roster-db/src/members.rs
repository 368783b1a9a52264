use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use roster_data::{
    now, Delete, Error, Insert, Insights, Member, MemberFilter, MemberForm, Query, Recent, Result,
    Retrieve, Summarize, Update, TIME_FORMAT,
};

use crate::Connection;

/// Number of members shown as recent entries
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

/// Written rows are read back in the same statement
const RETURNING_COLUMNS: &str =
    "RETURNING id, name, time, mode_of_payment, student_number, gmail, details";

const MEMBER_COLUMNS: &str = r#"
    SELECT
        id,
        name,
        time,
        mode_of_payment,
        student_number,
        gmail,
        details
    FROM members
"#;

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(MEMBER_COLUMNS);
        qry.push(" WHERE 1");

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(keyword) = filter.keyword.clone() {
            let pattern = format!("%{}%", keyword);
            qry.push(" AND (name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR student_number LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qry.push(" ORDER BY id ASC");

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = i64;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let member = self.query(&filter).await?.pop().ok_or(Error::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<MemberForm> for Connection {
    type Output = Member;

    /// Sign up a member. The time of sign-up is taken
    /// from the local clock.
    async fn insert(&self, form: MemberForm) -> Result<Member> {
        let time = now().format(TIME_FORMAT).to_string();
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"INSERT INTO members (
                name,
                time,
                mode_of_payment,
                student_number,
                gmail,
                details
            ) VALUES (
            "#,
        );
        qry.separated(", ")
            .push_bind(&form.name)
            .push_bind(&time)
            .push_bind(&form.mode_of_payment)
            .push_bind(&form.student_number)
            .push_bind(&form.gmail)
            .push_bind(&form.details);

        let member: Member = qry
            .push(") ")
            .push(RETURNING_COLUMNS)
            .build_query_as()
            .fetch_one(&mut *conn)
            .await?;
        tracing::debug!(id = member.id, "member added");
        Ok(member)
    }
}

#[async_trait]
impl Update<MemberForm> for Connection {
    type Key = i64;
    type Output = Member;

    /// Replace all editable fields of a member. The id and
    /// the time of sign-up are kept.
    async fn update(&self, member_id: Self::Key, form: MemberForm) -> Result<Option<Member>> {
        let mut conn = self.lock().await;
        let member: Option<Member> = QueryBuilder::<Sqlite>::new("UPDATE members SET")
            .push(" name = ")
            .push_bind(&form.name)
            .push(", mode_of_payment = ")
            .push_bind(&form.mode_of_payment)
            .push(", student_number = ")
            .push_bind(&form.student_number)
            .push(", gmail = ")
            .push_bind(&form.gmail)
            .push(", details = ")
            .push_bind(&form.details)
            .push(" WHERE id = ")
            .push_bind(member_id)
            .push(" ")
            .push(RETURNING_COLUMNS)
            .build_query_as()
            .fetch_optional(&mut *conn)
            .await?;
        if member.is_none() {
            tracing::debug!(id = member_id, "no member to update");
        }
        Ok(member)
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    type Key = i64;

    /// Delete member
    async fn delete(&self, member_id: Self::Key) -> Result<bool> {
        let mut conn = self.lock().await;
        let result = QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member_id)
            .build()
            .execute(&mut *conn)
            .await?;
        tracing::debug!(id = member_id, rows = result.rows_affected(), "member deleted");
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Recent<Member> for Connection {
    /// Most recently added members, newest first
    async fn recent(&self, limit: u32) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(MEMBER_COLUMNS);
        qry.push(" ORDER BY id DESC LIMIT ")
            .push_bind(i64::from(limit));
        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Summarize<Member> for Connection {
    type Summary = Insights;

    async fn summarize(&self) -> Result<Insights> {
        let mut conn = self.lock().await;
        let modes: Vec<String> =
            sqlx::query_scalar("SELECT mode_of_payment FROM members ORDER BY id ASC")
                .fetch_all(&mut *conn)
                .await?;
        Ok(Insights::from_modes(modes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, mode: &str, student_number: &str, gmail: &str) -> MemberForm {
        MemberForm {
            name: name.to_string(),
            mode_of_payment: mode.to_string(),
            student_number: student_number.to_string(),
            gmail: gmail.to_string(),
            details: None,
        }
    }

    async fn count(db: &Connection) -> usize {
        db.query(&MemberFilter::keyword("")).await.unwrap().len()
    }

    #[tokio::test]
    async fn test_member_insert() {
        let (_handle, db) = Connection::open_test().await;
        let before = now();
        let member = db
            .insert(MemberForm {
                details: Some("joined at the booth".to_string()),
                ..form("Test Member", "Card", "S-2023-001", "test@member.example")
            })
            .await
            .unwrap();

        assert!(member.id > 0);
        assert_eq!(member.name, "Test Member");
        assert_eq!(member.mode_of_payment, "Card");
        assert_eq!(member.student_number, "S-2023-001");
        assert_eq!(member.gmail, "test@member.example");
        assert_eq!(member.details.as_deref(), Some("joined at the booth"));
        assert!(member.time >= before);
        assert!(member.time <= now());

        let found = db
            .query(&MemberFilter::keyword("S-2023-001"))
            .await
            .unwrap();
        assert_eq!(found, vec![member]);
    }

    #[tokio::test]
    async fn test_member_insert_duplicate_student_number() {
        let (_handle, db) = Connection::open_test().await;
        db.insert(form("Ann", "Cash", "S001", "ann@x.com"))
            .await
            .unwrap();

        let err = db
            .insert(form("Bo", "Card", "S001", "bo@y.com"))
            .await
            .unwrap_err();
        match err {
            Error::DuplicateKey(column) => assert_eq!(column, "student_number"),
            err => panic!("unexpected error: {:?}", err),
        }
        assert_eq!(count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_member_insert_duplicate_gmail() {
        let (_handle, db) = Connection::open_test().await;
        db.insert(form("Ann", "Cash", "S001", "ann@x.com"))
            .await
            .unwrap();

        let err = db
            .insert(form("Ann Again", "Online", "S002", "ann@x.com"))
            .await
            .unwrap_err();
        match err {
            Error::DuplicateKey(column) => assert_eq!(column, "gmail"),
            err => panic!("unexpected error: {:?}", err),
        }
        let members = db.query(&MemberFilter::keyword("")).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Ann");
    }

    #[tokio::test]
    async fn test_member_ids_are_not_reused() {
        let (_handle, db) = Connection::open_test().await;
        let m1 = db
            .insert(form("Ann", "Cash", "S001", "ann@x.com"))
            .await
            .unwrap();
        db.delete(m1.id).await.unwrap();
        let m2 = db
            .insert(form("Ann", "Cash", "S001", "ann@x.com"))
            .await
            .unwrap();
        assert!(m2.id > m1.id);
    }

    #[tokio::test]
    async fn test_member_query_keyword() {
        let (_handle, db) = Connection::open_test().await;
        db.insert(form("Test Member 1", "Cash", "2021-1001", "one@example.org"))
            .await
            .unwrap();
        db.insert(form("Other Person", "Card", "2022-2002", "two@example.org"))
            .await
            .unwrap();
        db.insert(form("Test Member 3", "Online", "2022-3003", "three@example.org"))
            .await
            .unwrap();

        // Matches on the name, case insensitive
        let members = db.query(&MemberFilter::keyword("tEsT mEmBeR")).await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "Test Member 1");
        assert_eq!(members[1].name, "Test Member 3");

        // Matches on the student number
        let members = db.query(&MemberFilter::keyword("2022")).await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "Other Person");

        let members = db.query(&MemberFilter::keyword("f3st")).await.unwrap();
        assert!(members.is_empty());

        // The empty keyword lists everyone in insertion order
        let members = db.query(&MemberFilter::keyword("")).await.unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Test Member 1", "Other Person", "Test Member 3"]);
    }

    #[tokio::test]
    async fn test_member_retrieve_missing() {
        let (_handle, db) = Connection::open_test().await;
        let err = Retrieve::<Member>::retrieve(&db, 42).await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[tokio::test]
    async fn test_member_update() {
        let (_handle, db) = Connection::open_test().await;
        let member = db
            .insert(form("Test Member", "Cash", "S001", "member@example.org"))
            .await
            .unwrap();
        let other = db
            .insert(form("Other Member", "Card", "S002", "other@example.org"))
            .await
            .unwrap();

        let update = MemberForm {
            name: "Test Member Updated".to_string(),
            mode_of_payment: "Online".to_string(),
            student_number: "S003".to_string(),
            gmail: "new@email".to_string(),
            details: Some("was not very nice".to_string()),
        };
        let updated = db.update(member.id, update).await.unwrap().unwrap();
        assert_eq!(updated.id, member.id);
        assert_eq!(updated.time, member.time);
        assert_eq!(updated.name, "Test Member Updated");
        assert_eq!(updated.mode_of_payment, "Online");
        assert_eq!(updated.student_number, "S003");
        assert_eq!(updated.gmail, "new@email");
        assert_eq!(updated.details.as_deref(), Some("was not very nice"));

        // The other member is untouched
        let unchanged: Member = db.retrieve(other.id).await.unwrap();
        assert_eq!(unchanged, other);
    }

    #[tokio::test]
    async fn test_member_update_missing_is_noop() {
        let (_handle, db) = Connection::open_test().await;
        let member = db
            .insert(form("Ann", "Cash", "S001", "ann@x.com"))
            .await
            .unwrap();

        let result = db
            .update(member.id + 100, form("Nobody", "Card", "S999", "no@body"))
            .await
            .unwrap();
        assert!(result.is_none());

        let members = db.query(&MemberFilter::keyword("")).await.unwrap();
        assert_eq!(members, vec![member]);
    }

    #[tokio::test]
    async fn test_member_update_conflict_keeps_row() {
        let (_handle, db) = Connection::open_test().await;
        db.insert(form("Ann", "Cash", "S001", "ann@x.com"))
            .await
            .unwrap();
        let bo = db
            .insert(form("Bo", "Card", "S002", "bo@y.com"))
            .await
            .unwrap();

        let err = db
            .update(bo.id, form("Bo", "Card", "S001", "bo@y.com"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_key());

        let unchanged: Member = db.retrieve(bo.id).await.unwrap();
        assert_eq!(unchanged, bo);
    }

    #[tokio::test]
    async fn test_member_delete() {
        let (_handle, db) = Connection::open_test().await;
        let m1 = db
            .insert(form("Test Member 1", "Cash", "S001", "test1@example.org"))
            .await
            .unwrap();
        let m2 = db
            .insert(form("Test Member 2", "Cash", "S002", "test2@example.org"))
            .await
            .unwrap();

        assert!(db.delete(m1.id).await.unwrap());
        let members = db.query(&MemberFilter::keyword("")).await.unwrap();
        assert_eq!(members, vec![m2]);

        // Delete member again
        assert!(!db.delete(m1.id).await.unwrap());
        assert_eq!(count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_member_recent() {
        let (_handle, db) = Connection::open_test().await;
        assert!(db.recent(DEFAULT_RECENT_LIMIT).await.unwrap().is_empty());

        for i in 0..7 {
            db.insert(form(
                &format!("Member {}", i),
                "Cash",
                &format!("S{:03}", i),
                &format!("m{}@example.org", i),
            ))
            .await
            .unwrap();
        }

        let recent = db.recent(DEFAULT_RECENT_LIMIT).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].name, "Member 6");
        assert_eq!(recent[4].name, "Member 2");
        assert!(recent.windows(2).all(|pair| pair[0].id > pair[1].id));

        let recent = db.recent(20).await.unwrap();
        assert_eq!(recent.len(), 7);

        let recent = db.recent(0).await.unwrap();
        assert!(recent.is_empty());
    }

    #[tokio::test]
    async fn test_member_summarize() {
        let (_handle, db) = Connection::open_test().await;
        let insights = db.summarize().await.unwrap();
        assert_eq!(insights, Insights::default());

        db.insert(form("Ann", "Cash", "S001", "ann@x.com"))
            .await
            .unwrap();
        db.insert(form("Bo", "Cash", "S002", "bo@y.com"))
            .await
            .unwrap();
        db.insert(form("Cy", "Online", "S003", "cy@z.com"))
            .await
            .unwrap();

        let insights = db.summarize().await.unwrap();
        assert_eq!(insights.total, 3);
        assert_eq!(insights.distribution.len(), 2);
        assert_eq!(insights.distribution["Cash"], 2);
        assert_eq!(insights.distribution["Online"], 1);
        assert_eq!(insights.most_common.as_deref(), Some("Cash"));
    }

    #[tokio::test]
    async fn test_member_update_racing_delete() {
        let (_handle, db) = Connection::open_test().await;
        for i in 0..20 {
            let member = db
                .insert(form(
                    "Ann",
                    "Cash",
                    &format!("S{:03}", i),
                    &format!("ann{}@x.com", i),
                ))
                .await
                .unwrap();

            let changes = form(
                "Ann B.",
                "Card",
                &format!("S{:03}", i),
                &format!("ann{}@x.com", i),
            );
            let (updated, deleted) =
                tokio::join!(db.update(member.id, changes), db.delete(member.id));

            // Either order is fine, but the update never fails
            if let Some(updated) = updated.unwrap() {
                assert_eq!(updated.id, member.id);
                assert_eq!(updated.time, member.time);
                assert_eq!(updated.name, "Ann B.");
            }
            assert!(deleted.unwrap());
        }
        assert_eq!(count(&db).await, 0);
    }
}
