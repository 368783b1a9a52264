use csv::Writer;

use roster_data::Member;
use roster_db::Connection;

use crate::{
    records::{record, snapshot},
    ExportError, HEADER,
};

/// Export all members as comma separated values
/// with a header line.
pub async fn to_delimited_text(db: &Connection) -> Result<Vec<u8>, ExportError> {
    let members = snapshot(db).await?;
    encode(&members)
}

/// Encode members as comma separated values. Fields
/// containing delimiters, quotes or newlines are quoted.
pub fn encode(members: &[Member]) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(HEADER)?;
    for member in members {
        writer.write_record(record(member))?;
    }
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

#[cfg(test)]
mod tests {
    use csv::ReaderBuilder;

    use roster_data::{Insert, MemberForm};

    use super::*;

    fn read_records(data: &[u8]) -> Vec<Vec<String>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(data);
        reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_empty_registry_has_header_only() {
        let (_handle, db) = Connection::open_test().await;
        let data = to_delimited_text(&db).await.unwrap();
        assert_eq!(
            String::from_utf8(data).unwrap(),
            "id,name,time,mode_of_payment,student_number,gmail,details\n"
        );
    }

    #[tokio::test]
    async fn test_one_row_per_member() {
        let (_handle, db) = Connection::open_test().await;
        let ann = db
            .insert(MemberForm {
                name: "Ann".to_string(),
                mode_of_payment: "Cash".to_string(),
                student_number: "S001".to_string(),
                gmail: "ann@x.com".to_string(),
                details: None,
            })
            .await
            .unwrap();
        let bo = db
            .insert(MemberForm {
                name: "Bo, Jr.".to_string(),
                mode_of_payment: "Online".to_string(),
                student_number: "S002".to_string(),
                gmail: "bo@y.com".to_string(),
                details: Some("paid twice\nrefund pending".to_string()),
            })
            .await
            .unwrap();

        let data = to_delimited_text(&db).await.unwrap();
        let text = String::from_utf8(data.clone()).unwrap();
        assert!(text.contains("\"Bo, Jr.\""));

        let records = read_records(&data);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], HEADER.to_vec());
        assert_eq!(
            records[1],
            vec![
                ann.id.to_string(),
                "Ann".to_string(),
                ann.time_formatted(),
                "Cash".to_string(),
                "S001".to_string(),
                "ann@x.com".to_string(),
                "".to_string(),
            ]
        );
        assert_eq!(records[2][0], bo.id.to_string());
        assert_eq!(records[2][1], "Bo, Jr.");
        assert_eq!(records[2][6], "paid twice\nrefund pending");
    }
}
