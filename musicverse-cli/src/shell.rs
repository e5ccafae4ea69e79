//! Line-oriented command loop over a [`MusicApp`]

use chrono::Datelike;
use musicverse_applications::{
    ApplicationError, FilterUpdate, GroupBy, LibraryPage, MusicApp, NewSong, Role, SortBy,
    SortOrder,
};
use std::io::{self, BufRead, Write};
use tracing::debug;

const ADD_USAGE: &str = "add <title> <artist> <album> <duration> <genre> [year] [cover]";

#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("Usage: {0}")]
    Usage(String),

    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    App(#[from] ApplicationError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

type CommandResult = Result<(), CommandError>;

fn usage(text: &str) -> CommandError {
    CommandError::Usage(text.to_string())
}

enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    app: MusicApp,
}

impl Shell {
    pub fn new(app: MusicApp) -> Self {
        Self { app }
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "🎵 **Musicverse**")?;
        match self.app.current_user() {
            Some(user) => writeln!(out, "👤 Welcome back, {} ({})", user.name, user.role)?,
            None => writeln!(out, "🔒 Not logged in. Try 'demo admin', 'demo user' or 'accounts'")?,
        }
        writeln!(out, "💡 Type 'help' for commands, 'quit' to exit\n")?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}> ", self.prompt())?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };

            if let Flow::Quit = self.execute(&line?, out)? {
                break;
            }
        }

        writeln!(out, "👋 Goodbye!")?;
        Ok(())
    }

    fn prompt(&self) -> String {
        match self.app.current_user() {
            Some(user) => format!("musicverse ({})", user.role),
            None => "musicverse".to_string(),
        }
    }

    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "❌ Could not parse input: {}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let Some((command, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };
        debug!(command = %command, args = args.len(), "Shell command");

        let result = match command.to_lowercase().as_str() {
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "h" => self.show_help(out).map_err(CommandError::from),
            "login" => self.login(args, out),
            "demo" => self.demo(args, out),
            "accounts" => self.accounts(out),
            "whoami" => self.whoami(out),
            "logout" => self.logout(out),
            "list" | "ls" => self.list(out),
            "stats" => self.stats(out),
            "search" => self.filter(FilterUpdate::new().search(args.join(" ")), out),
            "genre" => self.genre(args, out),
            "sort" => self.sort(args, out),
            "order" => self.toggle_order(out),
            "group" => self.group(args, out),
            "clear" => self.clear(out),
            "artists" => self.print_list("Artists", self.app.unique_artists(), out),
            "albums" => self.print_list("Albums", self.app.unique_albums(), out),
            "genres" => self.print_list("Genres", self.app.unique_genres(), out),
            "add" => self.add(args, out),
            "remove" | "rm" => self.remove(args, out),
            other => Err(CommandError::Rejected(format!(
                "Unknown command '{}'. Type 'help' for commands",
                other
            ))),
        };

        match result {
            Ok(()) => {}
            Err(CommandError::Io(e)) => return Err(e),
            Err(e) => writeln!(out, "❌ {}", e)?,
        }

        Ok(Flow::Continue)
    }

    fn show_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "🔧 **Available Commands:**")?;
        writeln!(out, "  login <email> <password>  - Log in")?;
        writeln!(out, "  demo admin|user           - Log in with a demo account")?;
        writeln!(out, "  accounts                  - Show the demo accounts")?;
        writeln!(out, "  whoami                    - Show the current user")?;
        writeln!(out, "  logout                    - Log out")?;
        writeln!(out, "  list                      - Show the library with current filters")?;
        writeln!(out, "  stats                     - Show library statistics")?;
        writeln!(out, "  search <text>             - Search titles, artists and albums")?;
        writeln!(out, "  genre <name|all>          - Only show one genre")?;
        writeln!(out, "  sort <key> [asc|desc]     - Sort by title, artist, album or year")?;
        writeln!(out, "  order                     - Flip the sort order")?;
        writeln!(out, "  group <key>               - Group by none, artist, album or genre")?;
        writeln!(out, "  clear                     - Reset all filters")?;
        writeln!(out, "  artists, albums, genres   - List distinct values")?;
        writeln!(out, "  {}", ADD_USAGE)?;
        writeln!(out, "                            - Add a song (admin)")?;
        writeln!(out, "  remove <id>               - Remove a song (admin)")?;
        writeln!(out, "  quit, exit                - Leave\n")?;
        Ok(())
    }

    fn login<W: Write>(&mut self, args: &[String], out: &mut W) -> CommandResult {
        let [email, password] = args else {
            return Err(usage("login <email> <password>"));
        };
        self.login_with(email, password, out)
    }

    fn demo<W: Write>(&mut self, args: &[String], out: &mut W) -> CommandResult {
        let [role] = args else {
            return Err(usage("demo admin|user"));
        };
        let role: Role = role.parse().map_err(|_| usage("demo admin|user"))?;

        let account = self
            .app
            .demo_accounts()
            .iter()
            .find(|account| account.role == role)
            .ok_or_else(|| CommandError::Rejected(format!("No demo account for role {}", role)))?;

        self.login_with(account.email, account.password, out)
    }

    fn login_with<W: Write>(&mut self, email: &str, password: &str, out: &mut W) -> CommandResult {
        if let Some(user) = self.app.current_user() {
            return Err(CommandError::Rejected(format!(
                "Already logged in as {}; logout first",
                user.email
            )));
        }

        if !self.app.login(email, password) {
            return Err(CommandError::Rejected(
                "Invalid email or password".to_string(),
            ));
        }

        if let Some(user) = self.app.current_user() {
            writeln!(out, "✅ Welcome, {} ({})", user.name, user.role)?;
        }
        Ok(())
    }

    fn accounts<W: Write>(&self, out: &mut W) -> CommandResult {
        writeln!(out, "🔑 Demo accounts:")?;
        for account in self.app.demo_accounts() {
            writeln!(
                out,
                "  {:<22} {:<10} ({})",
                account.email, account.password, account.role
            )?;
        }
        Ok(())
    }

    fn whoami<W: Write>(&self, out: &mut W) -> CommandResult {
        let user = self
            .app
            .current_user()
            .ok_or(ApplicationError::NotAuthenticated)?;
        writeln!(out, "👤 {} <{}> ({})", user.name, user.email, user.role)?;
        Ok(())
    }

    fn logout<W: Write>(&mut self, out: &mut W) -> CommandResult {
        if !self.app.is_authenticated() {
            return Err(ApplicationError::NotAuthenticated.into());
        }
        self.app.logout();
        writeln!(out, "👋 Logged out")?;
        Ok(())
    }

    fn list<W: Write>(&self, out: &mut W) -> CommandResult {
        let page = self.app.library()?;
        render_library(&page, out)?;
        Ok(())
    }

    fn stats<W: Write>(&self, out: &mut W) -> CommandResult {
        let page = self.app.library()?;
        let stats = &page.stats;

        writeln!(out, "📊 **Library Stats**")?;
        writeln!(out, "  Songs:          {} of {}", stats.total_songs, page.total_songs)?;
        writeln!(out, "  Artists:        {}", stats.unique_artists)?;
        writeln!(out, "  Genres:         {}", stats.unique_genres)?;
        writeln!(out, "  Most popular:   {}", stats.most_popular_genre)?;
        for (genre, count) in &stats.genre_distribution {
            writeln!(out, "    {:<16} {}", genre, count)?;
        }
        Ok(())
    }

    /// Apply a filter change and show the result
    fn filter<W: Write>(&mut self, update: FilterUpdate, out: &mut W) -> CommandResult {
        self.app.update_filters(update)?;
        self.list(out)
    }

    fn genre<W: Write>(&mut self, args: &[String], out: &mut W) -> CommandResult {
        if args.is_empty() {
            return Err(usage("genre <name|all>"));
        }
        self.filter(FilterUpdate::new().genre(args.join(" ")), out)
    }

    fn sort<W: Write>(&mut self, args: &[String], out: &mut W) -> CommandResult {
        let (key, order) = match args {
            [key] => (key, None),
            [key, order] => (key, Some(order)),
            _ => return Err(usage("sort <title|artist|album|year> [asc|desc]")),
        };

        let sort_by = key.parse::<SortBy>().map_err(CommandError::Rejected)?;
        let mut update = FilterUpdate::new().sort_by(sort_by);
        if let Some(order) = order {
            let sort_order = order.parse::<SortOrder>().map_err(CommandError::Rejected)?;
            update = update.sort_order(sort_order);
        }
        self.filter(update, out)
    }

    fn toggle_order<W: Write>(&mut self, out: &mut W) -> CommandResult {
        self.app.toggle_sort_order()?;
        self.list(out)
    }

    fn group<W: Write>(&mut self, args: &[String], out: &mut W) -> CommandResult {
        let [key] = args else {
            return Err(usage("group <none|artist|album|genre>"));
        };
        let group_by = key.parse::<GroupBy>().map_err(CommandError::Rejected)?;
        self.filter(FilterUpdate::new().group_by(group_by), out)
    }

    fn clear<W: Write>(&mut self, out: &mut W) -> CommandResult {
        self.app.clear_filters()?;
        self.list(out)
    }

    fn print_list<W: Write>(
        &self,
        title: &str,
        values: Result<Vec<String>, ApplicationError>,
        out: &mut W,
    ) -> CommandResult {
        let values = values?;
        writeln!(out, "📋 {} ({}):", title, values.len())?;
        for value in values {
            writeln!(out, "  {}", value)?;
        }
        Ok(())
    }

    fn add<W: Write>(&mut self, args: &[String], out: &mut W) -> CommandResult {
        if !(5..=7).contains(&args.len()) {
            if let Ok(options) = self.app.genre_options() {
                writeln!(out, "🎼 Genres: {}", options.join(", "))?;
            }
            return Err(usage(ADD_USAGE));
        }

        let year = match args.get(5) {
            Some(year) => year
                .parse::<i32>()
                .map_err(|_| CommandError::Rejected(format!("Year must be a number, got '{}'", year)))?,
            None => chrono::Local::now().year(),
        };

        let song = NewSong {
            title: args[0].clone(),
            artist: args[1].clone(),
            album: args[2].clone(),
            duration: args[3].clone(),
            genre: args[4].clone(),
            year,
            cover_url: args.get(6).cloned(),
        };

        let song = self.app.add_song(song)?;
        writeln!(
            out,
            "✅ \"{}\" by {} has been added to the library (id {})",
            song.title, song.artist, song.id
        )?;
        Ok(())
    }

    fn remove<W: Write>(&mut self, args: &[String], out: &mut W) -> CommandResult {
        let [id] = args else {
            return Err(usage("remove <id>"));
        };

        let title = self.app.catalog().get(id).map(|song| song.title.clone());
        if !self.app.remove_song(id)? {
            return Err(CommandError::Rejected(format!("No song with id {}", id)));
        }

        writeln!(
            out,
            "🗑️ \"{}\" has been removed from the library",
            title.unwrap_or_else(|| id.clone())
        )?;
        Ok(())
    }
}

fn render_library<W: Write>(page: &LibraryPage, out: &mut W) -> io::Result<()> {
    let filters = &page.filters;

    let mut summary = format!(
        "📀 {} of {} songs · sort: {} {} · group: {}",
        page.view.songs.len(),
        page.total_songs,
        filters.sort_by,
        filters.sort_order,
        filters.group_by
    );
    if filters.genre_filter_active() {
        summary.push_str(&format!(" · genre: {}", filters.genre));
    }
    if !filters.search.is_empty() {
        summary.push_str(&format!(" · search: \"{}\"", filters.search));
    }
    writeln!(out, "{}", summary)?;

    if page.view.is_empty() {
        writeln!(out, "🎵 No Songs Found")?;
        if !filters.search.is_empty() || filters.genre_filter_active() {
            writeln!(out, "   Try adjusting your filters to see more results.")?;
        } else {
            writeln!(out, "   The music library is empty. Add some songs to get started!")?;
        }
        return Ok(());
    }

    for group in &page.view.groups {
        let count = group.songs.len();
        writeln!(
            out,
            "== {} ({} song{}) ==",
            group.label,
            count,
            if count == 1 { "" } else { "s" }
        )?;
        for song in &group.songs {
            writeln!(
                out,
                "  [{}] {} - {} · {} ({}) · {} · {}",
                song.id, song.title, song.artist, song.album, song.year, song.genre, song.duration
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use musicverse_core::{LoggingConfig, MusicverseConfig, SlotBacking};

    fn shell() -> Shell {
        let mut config = MusicverseConfig::default();
        config.session.storage = SlotBacking::Memory;
        Shell::new(MusicApp::start(&config).unwrap())
    }

    fn run_script(shell: &mut Shell, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_library_is_gated_by_login() {
        let mut shell = shell();
        let output = run_script(&mut shell, "list\ndemo user\nlist\n");

        assert!(output.contains("❌ Not logged in"));
        assert!(output.contains("✅ Welcome, Regular User (user)"));
        assert!(output.contains("📀 10 of 10 songs"));
        assert!(output.contains("== All Songs (10 songs) =="));
    }

    #[test]
    fn test_bad_credentials_rejected() {
        let mut shell = shell();
        let output = run_script(&mut shell, "login admin@musicverse.com wrong\nwhoami\n");

        assert!(output.contains("❌ Invalid email or password"));
        assert!(output.contains("❌ Not logged in"));
    }

    #[test]
    fn test_user_cannot_add() {
        let mut shell = shell();
        let output = run_script(&mut shell, "demo user\nadd A B C 3:00 Jazz\nremove 1\n");

        assert!(output.contains("❌ Permission error"));
        assert_eq!(shell.app.catalog().total_songs(), 10);
    }

    #[test]
    fn test_admin_add_filter_remove() {
        let mut shell = shell();
        let script = "demo admin\n\
                      add \"Feeling Good\" \"Nina Simone\" \"I Put a Spell on You\" 2:55 Jazz 1965\n\
                      genre Jazz\n\
                      remove 11\n\
                      list\n";
        let output = run_script(&mut shell, script);

        assert!(output.contains("\"Feeling Good\" by Nina Simone has been added to the library (id 11)"));
        assert!(output.contains("[11] Feeling Good - Nina Simone · I Put a Spell on You (1965) · Jazz · 2:55"));
        assert!(output.contains("\"Feeling Good\" has been removed from the library"));
        assert!(output.contains("Try adjusting your filters"));
    }

    #[test]
    fn test_add_reports_missing_field() {
        let mut shell = shell();
        let output = run_script(&mut shell, "demo admin\nadd Title \"\" Album 3:00 Rock\n");

        assert!(output.contains("❌ Validation error: artist is required"));
        assert_eq!(shell.app.catalog().total_songs(), 10);
    }

    #[test]
    fn test_sort_and_group_commands() {
        let mut shell = shell();
        let output = run_script(&mut shell, "demo user\nsort year desc\ngroup genre\nsort rating\n");

        let first_song = output
            .lines()
            .find(|line| line.trim_start().starts_with('['))
            .unwrap();
        assert!(first_song.contains("Lose Yourself"));
        assert!(output.contains("== Hip Hop (1 song) =="));
        assert!(output.contains("❌ Unknown SortBy: rating"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut shell = shell();
        let output = run_script(&mut shell, "quit\ndemo admin\n");

        assert!(output.contains("👋 Goodbye!"));
        assert!(!shell.app.is_authenticated());
    }

    #[test]
    fn test_unbalanced_quotes() {
        let mut shell = shell();
        let output = run_script(&mut shell, "demo user\nsearch \"unterminated\n");

        assert!(output.contains("❌ Could not parse input"));
    }

    #[test]
    fn test_logout_and_login_again() {
        let mut shell = shell();
        let output = run_script(&mut shell, "demo admin\ndemo user\nlogout\ndemo user\nwhoami\n");

        assert!(output.contains("Already logged in as admin@musicverse.com"));
        assert!(output.contains("👋 Logged out"));
        assert!(output.contains("👤 Regular User <user@musicverse.com> (user)"));
    }

    #[test]
    fn test_verbose_preset_covers_shell_target() {
        let crate_target = module_path!().split("::").next().unwrap();
        assert_eq!(crate_target, "musicverse");
        assert!(LoggingConfig::verbose()
            .filter_directives
            .contains(&format!("{}=debug", crate_target)));
    }
}
