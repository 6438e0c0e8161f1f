use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
}

impl Book {
    pub fn new(title: &str, author: &str) -> Self {
        Self { title: title.to_string(), author: author.to_string() }
    }
}

/// Ordered list of books.
#[derive(Clone, Debug, Default)]
pub struct BookShelf {
    books: Vec<Book>,
}

impl BookShelf {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn favorites() -> Self {
        Self::new(vec![
            Book::new("The Way of Kings", "Brandon Sanderson"),
            Book::new("The Wise Man's Fear", "Patrick Rothfuss"),
            Book::new("The Crippled God", "Steven Erikson"),
            Book::new("The Fifth Season", "N.K. Jemisin"),
            Book::new("The Name of the Wind", "Patrick Rothfuss"),
            Book::new("The Broken Earth Trilogy", "N.K. Jemisin"),
            Book::new("The Night Circus", "Erin Morgenstern"),
            Book::new("The Starless Sea", "Erin Morgenstern"),
            Book::new("The Shadow of What Was Lost", "James Islington"),
            Book::new("The Black Prism", "Brent Weeks"),
        ])
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// `"Book {n}: {title}, Author: {author}"` for the first `count` books.
    pub fn first(&self, count: usize) -> Vec<String> {
        self.books
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, b)| format!("Book {}: {}, Author: {}", i + 1, b.title, b.author))
            .collect()
    }

    pub fn first_three(&self) -> Vec<String> {
        self.first(3)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Student {
    pub name: String,
}

/// Students keyed by id.
#[derive(Clone, Debug, Default)]
pub struct StudentDirectory {
    students: BTreeMap<u32, Student>,
}

impl StudentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let names = [
            "Alice", "Bob", "Charlie", "Diana", "Ethan", "Fiona", "George", "Hannah", "Ian",
            "Julia",
        ];
        let mut dir = Self::new();
        for (id, name) in (100..).zip(names) {
            dir.insert(id, name);
        }
        dir
    }

    pub fn insert(&mut self, id: u32, name: &str) -> Option<Student> {
        self.students.insert(id, Student { name: name.to_string() })
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.students.get(&id).map(|s| s.name.as_str())
    }

    /// Names in id order.
    pub fn names(&self) -> Vec<&str> {
        self.students.values().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
