use bookseed_core::db::open_db_in_memory;
use bookseed_core::{
    AuthorId, AuthorRepository, BookRepository, NewAuthor, NewBook, PageQuery, RepoError,
    SqliteAuthorRepository, SqliteBookRepository,
};

fn book(title: &str, author_id: AuthorId) -> NewBook {
    NewBook {
        title: title.to_string(),
        description: String::new(),
        author_id,
    }
}

#[test]
fn create_authors_assigns_ids_in_input_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let created = repo
        .create_authors(&[NewAuthor::new("A"), NewAuthor::new("B"), NewAuthor::new("A")])
        .unwrap();

    let names: Vec<_> = created.iter().map(|author| author.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "A"]);
    assert!(created[0].id < created[1].id && created[1].id < created[2].id);
    assert_eq!(repo.count_authors().unwrap(), 3);

    let found = repo.find_author(created[1].id).unwrap().unwrap();
    assert_eq!(found, created[1]);
    assert!(repo.find_author(AuthorId(9_999)).unwrap().is_none());
}

#[test]
fn create_authors_rejects_blank_names_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let err = repo
        .create_authors(&[NewAuthor::new("A"), NewAuthor::new("   ")])
        .unwrap_err();

    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.count_authors().unwrap(), 0);
}

#[test]
fn insert_batch_is_all_or_nothing() {
    let conn = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::try_new(&conn).unwrap();
    let books = SqliteBookRepository::try_new(&conn).unwrap();
    let author = authors.create_authors(&[NewAuthor::new("A")]).unwrap().remove(0);

    let written = books
        .insert_batch(&[book("Tale 1", author.id), book("Tale 2", author.id)])
        .unwrap();
    assert_eq!(written, 2);

    let err = books
        .insert_batch(&[book("Tale 3", author.id), book("Tale 4", AuthorId(404))])
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(books.count_books().unwrap(), 2);
}

#[test]
fn deleting_authors_with_books_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::try_new(&conn).unwrap();
    let books = SqliteBookRepository::try_new(&conn).unwrap();
    let author = authors.create_authors(&[NewAuthor::new("A")]).unwrap().remove(0);
    books.insert_batch(&[book("Tale 1", author.id)]).unwrap();

    assert!(authors.delete_all_authors().is_err());
    assert_eq!(authors.count_authors().unwrap(), 1);

    assert_eq!(books.delete_all_books().unwrap(), 1);
    assert_eq!(authors.delete_all_authors().unwrap(), 1);
}

#[test]
fn lists_are_paginated() {
    let conn = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::try_new(&conn).unwrap();
    let books = SqliteBookRepository::try_new(&conn).unwrap();
    let created = authors
        .create_authors(&[NewAuthor::new("Chekhov"), NewAuthor::new("Gogol"), NewAuthor::new("Blok")])
        .unwrap();
    let batch: Vec<_> = (1..=5)
        .map(|n| book(&format!("Tale {n}"), created[1].id))
        .collect();
    books.insert_batch(&batch).unwrap();

    let first_page = authors
        .list_authors_with_book_count(PageQuery { limit: 2, offset: 0 })
        .unwrap();
    let names: Vec<_> = first_page.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Blok", "Chekhov"]);
    assert!(first_page.iter().all(|row| row.book_count == 0));

    let second_page = authors
        .list_authors_with_book_count(PageQuery { limit: 2, offset: 2 })
        .unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].name, "Gogol");
    assert_eq!(second_page[0].book_count, 5);

    let page = books
        .list_books_by_author(created[1].id, PageQuery { limit: 2, offset: 3 })
        .unwrap();
    let titles: Vec<_> = page.iter().map(|row| row.title.as_str()).collect();
    assert_eq!(titles, vec!["Tale 4", "Tale 5"]);
    assert_eq!(books.count_books_by_author(created[1].id).unwrap(), 5);
    assert_eq!(books.count_books_by_author(created[0].id).unwrap(), 0);
}
